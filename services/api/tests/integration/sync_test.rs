use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use eloquia_api::error::ApiError;
use eloquia_api::usecase::entry::{ListPatientEntriesUseCase, RecentEntriesUseCase};
use eloquia_api::usecase::sync::{SyncEntriesUseCase, SyncEntryInput, SyncInput};

use crate::helpers::{
    MockEntryRepo, MockLinkRepo, MockPatientRepo, approved_link, test_entry, test_patient,
};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}

fn upload(id: Uuid, happened_at: DateTime<Utc>) -> SyncEntryInput {
    SyncEntryInput {
        id: Some(id.to_string()),
        happened_at: Some(happened_at),
        ..SyncEntryInput::default()
    }
}

// ── SyncEntriesUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_uploaded_entry_under_session_patient() {
    let repo = MockEntryRepo::empty();
    let entries_handle = repo.entries_handle();
    let patient_id = Uuid::now_v7();
    let id = Uuid::new_v4();

    let result = SyncEntriesUseCase { entries: repo }
        .execute(
            patient_id,
            SyncInput {
                entries: vec![SyncEntryInput {
                    notes: Some("ordered coffee".to_owned()),
                    tags: Some(vec!["cafe".to_owned()]),
                    created_at: Some(at(1, 7)),
                    ..upload(id, at(1, 8))
                }],
                ..SyncInput::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(result.len(), 1);
    let stored = &entries_handle.lock().unwrap()[0];
    assert_eq!(stored.id, id);
    assert_eq!(stored.patient_id, patient_id);
    assert_eq!(stored.notes.as_deref(), Some("ordered coffee"));
    assert_eq!(stored.created_at, at(1, 7));
}

#[tokio::test]
async fn should_clear_notes_and_keep_tags_on_update() {
    let patient_id = Uuid::now_v7();
    let mut existing = test_entry(patient_id, at(1, 8));
    existing.notes = Some("old".to_owned());
    existing.tags = Some(vec!["work".to_owned()]);
    existing.stutter_frequency = Some(4);
    let repo = MockEntryRepo::new(vec![existing.clone()]);
    let entries_handle = repo.entries_handle();

    SyncEntriesUseCase { entries: repo }
        .execute(
            patient_id,
            SyncInput {
                entries: vec![SyncEntryInput {
                    updated_at: Some(at(2, 0)),
                    ..upload(existing.id, at(1, 9))
                }],
                ..SyncInput::default()
            },
        )
        .await
        .unwrap();

    let stored = &entries_handle.lock().unwrap()[0];
    assert_eq!(stored.happened_at, at(1, 9));
    assert_eq!(stored.notes, None);
    assert_eq!(stored.tags, Some(vec!["work".to_owned()]));
    assert_eq!(stored.stutter_frequency, Some(4));
    assert_eq!(stored.updated_at, at(2, 0));
}

#[tokio::test]
async fn should_reject_entry_owned_by_another_patient() {
    let owner = Uuid::now_v7();
    let existing = test_entry(owner, at(1, 8));
    let repo = MockEntryRepo::new(vec![existing.clone()]);
    let entries_handle = repo.entries_handle();

    let result = SyncEntriesUseCase { entries: repo }
        .execute(
            Uuid::now_v7(),
            SyncInput {
                entries: vec![SyncEntryInput {
                    notes: Some("hijack".to_owned()),
                    ..upload(existing.id, at(1, 9))
                }],
                ..SyncInput::default()
            },
        )
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, ApiError::EntryNotOwned));
    assert_eq!(err.to_string(), "entry does not belong to patient");
    assert_eq!(entries_handle.lock().unwrap()[0], existing);
}

#[tokio::test]
async fn should_validate_every_upload_before_writing() {
    let repo = MockEntryRepo::empty();
    let entries_handle = repo.entries_handle();
    let usecase = SyncEntriesUseCase { entries: repo };

    let cases = [
        (SyncEntryInput::default(), "entry missing id"),
        (
            SyncEntryInput {
                id: Some("not-a-uuid".to_owned()),
                happened_at: Some(at(1, 8)),
                ..SyncEntryInput::default()
            },
            "invalid entry id",
        ),
        (
            SyncEntryInput {
                id: Some(Uuid::new_v4().to_string()),
                ..SyncEntryInput::default()
            },
            "entry missing happenedAt",
        ),
    ];
    for (bad, expected) in cases {
        let err = usecase
            .execute(
                Uuid::now_v7(),
                SyncInput {
                    entries: vec![upload(Uuid::new_v4(), at(1, 8)), bad],
                    ..SyncInput::default()
                },
            )
            .await
            .unwrap_err();
        assert!(
            matches!(err, ApiError::Validation(ref msg) if msg == expected),
            "expected {expected:?}, got {err:?}"
        );
    }
    assert!(entries_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_filter_download_and_order_newest_first() {
    let patient_id = Uuid::now_v7();
    let mut old = test_entry(patient_id, at(1, 8));
    old.updated_at = at(1, 8);
    let mut mid = test_entry(patient_id, at(2, 8));
    mid.updated_at = at(5, 0);
    let mut new = test_entry(patient_id, at(3, 8));
    new.updated_at = at(5, 0);
    let foreign = test_entry(Uuid::now_v7(), at(3, 9));
    let usecase = SyncEntriesUseCase {
        entries: MockEntryRepo::new(vec![old, mid.clone(), new.clone(), foreign]),
    };

    let all = usecase.execute(patient_id, SyncInput::default()).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].happened_at >= w[1].happened_at));

    let changed = usecase
        .execute(
            patient_id,
            SyncInput {
                updated_since: Some("2024-01-02T00:00:00Z".to_owned()),
                to: Some("2024-01-02T23:59:59Z".to_owned()),
                ..SyncInput::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].id, mid.id);
}

#[tokio::test]
async fn should_ignore_filters_when_uploading() {
    let patient_id = Uuid::now_v7();
    let existing = test_entry(patient_id, at(1, 8));
    let usecase = SyncEntriesUseCase {
        entries: MockEntryRepo::new(vec![existing]),
    };

    let result = usecase
        .execute(
            patient_id,
            SyncInput {
                from: Some("2030-01-01T00:00:00Z".to_owned()),
                entries: vec![upload(Uuid::new_v4(), at(2, 8))],
                ..SyncInput::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(result.len(), 2);
}

#[tokio::test]
async fn should_name_the_bad_filter() {
    let usecase = SyncEntriesUseCase {
        entries: MockEntryRepo::empty(),
    };
    let cases = [
        (
            SyncInput {
                updated_since: Some("yesterday".to_owned()),
                ..SyncInput::default()
            },
            "invalid updatedSince",
        ),
        (
            SyncInput {
                from: Some("2024-13-01".to_owned()),
                ..SyncInput::default()
            },
            "invalid from",
        ),
        (
            SyncInput {
                to: Some("soon".to_owned()),
                ..SyncInput::default()
            },
            "invalid to",
        ),
    ];
    for (input, expected) in cases {
        let err = usecase.execute(Uuid::now_v7(), input).await.unwrap_err();
        assert_eq!(err.to_string(), expected);
    }
}

// ── ListPatientEntriesUseCase ────────────────────────────────────────────────

#[tokio::test]
async fn should_forbid_entries_without_approved_link() {
    let result = ListPatientEntriesUseCase {
        links: MockLinkRepo::empty(),
        entries: MockEntryRepo::empty(),
    }
    .execute(Uuid::now_v7(), Uuid::now_v7(), None, None)
    .await;

    assert!(matches!(result, Err(ApiError::NoApprovedLink)));
}

#[tokio::test]
async fn should_list_linked_patient_entries_oldest_first_within_bounds() {
    let doctor_id = Uuid::now_v7();
    let patient_id = Uuid::now_v7();
    let usecase = ListPatientEntriesUseCase {
        links: MockLinkRepo::new(vec![approved_link(doctor_id, patient_id, at(1, 0))]),
        entries: MockEntryRepo::new(vec![
            test_entry(patient_id, at(3, 8)),
            test_entry(patient_id, at(1, 8)),
            test_entry(patient_id, at(2, 8)),
        ]),
    };

    let all = usecase.execute(doctor_id, patient_id, None, None).await.unwrap();
    let days: Vec<_> = all.iter().map(|e| e.happened_at).collect();
    assert_eq!(days, vec![at(1, 8), at(2, 8), at(3, 8)]);

    let bounded = usecase
        .execute(
            doctor_id,
            patient_id,
            Some("2024-01-02T00:00:00Z"),
            Some("2024-01-02T23:00:00Z"),
        )
        .await
        .unwrap();
    assert_eq!(bounded.len(), 1);

    let bad = usecase
        .execute(doctor_id, patient_id, Some("last week"), None)
        .await;
    assert!(matches!(
        bad,
        Err(ApiError::Validation(ref msg)) if msg == "invalid time range"
    ));
}

// ── RecentEntriesUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_pair_recent_entries_with_linked_patients() {
    let doctor_id = Uuid::now_v7();
    let ana = test_patient("Ana");
    let bo = test_patient("Bo");
    let stranger = test_patient("Stranger");
    let usecase = RecentEntriesUseCase {
        links: MockLinkRepo::new(vec![
            approved_link(doctor_id, ana.id, at(1, 0)),
            approved_link(doctor_id, bo.id, at(1, 0)),
        ]),
        entries: MockEntryRepo::new(vec![
            test_entry(ana.id, at(1, 8)),
            test_entry(bo.id, at(3, 8)),
            test_entry(ana.id, at(2, 8)),
            test_entry(stranger.id, at(4, 8)),
        ]),
        patients: MockPatientRepo::new(vec![ana.clone(), bo.clone(), stranger]),
    };

    let rows = usecase.execute(doctor_id, 2).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].patient.id, bo.id);
    assert_eq!(rows[0].entry.happened_at, at(3, 8));
    assert_eq!(rows[1].patient.id, ana.id);
    assert_eq!(rows[1].entry.happened_at, at(2, 8));
}

#[tokio::test]
async fn should_return_no_recent_rows_without_links() {
    let rows = RecentEntriesUseCase {
        links: MockLinkRepo::empty(),
        entries: MockEntryRepo::empty(),
        patients: MockPatientRepo::empty(),
    }
    .execute(Uuid::now_v7(), 5)
    .await
    .unwrap();

    assert!(rows.is_empty());
}
