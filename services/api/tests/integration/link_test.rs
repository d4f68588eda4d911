use chrono::{Duration, Utc};
use uuid::Uuid;

use eloquia_api::domain::types::Link;
use eloquia_api::error::ApiError;
use eloquia_api::usecase::link::{
    ApproveLinkUseCase, InviteLinkUseCase, ListPatientsUseCase, PatientSelector,
    RevokeLinksUseCase,
};
use eloquia_domain::link::LinkStatus;

use crate::helpers::{MockLinkRepo, MockPatientRepo, approved_link, test_patient};

fn by_email(email: &str, display_name: Option<&str>) -> PatientSelector {
    PatientSelector {
        patient_email: Some(email.to_owned()),
        display_name: display_name.map(str::to_owned),
        ..PatientSelector::default()
    }
}

// ── InviteLinkUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_patient_and_pending_link_for_new_email() {
    let patients = MockPatientRepo::empty();
    let patients_handle = patients.patients_handle();
    let links = MockLinkRepo::empty();
    let links_handle = links.links_handle();
    let doctor_id = Uuid::now_v7();

    let (link, patient) = InviteLinkUseCase { patients, links }
        .execute(doctor_id, by_email("  Ana@Example.COM ", Some("Ana")))
        .await
        .unwrap();

    assert_eq!(patient.email.as_deref(), Some("ana@example.com"));
    assert_eq!(patient.display_name, "Ana");
    assert!(patient.password_hash.is_none());
    assert_eq!(link.status, LinkStatus::Pending);
    assert_eq!(link.doctor_id, doctor_id);
    assert_eq!(link.patient_id, patient.id);
    assert_eq!(patients_handle.lock().unwrap().len(), 1);
    assert_eq!(links_handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reuse_existing_patient_found_by_email() {
    let mut existing = test_patient("Ana");
    existing.email = Some("ana@example.com".to_owned());
    let patients = MockPatientRepo::new(vec![existing.clone()]);
    let patients_handle = patients.patients_handle();

    let (_, patient) = InviteLinkUseCase {
        patients,
        links: MockLinkRepo::empty(),
    }
    .execute(Uuid::now_v7(), by_email("ana@example.com", None))
    .await
    .unwrap();

    assert_eq!(patient.id, existing.id);
    assert_eq!(patients_handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_require_display_name_when_creating_patient() {
    let result = InviteLinkUseCase {
        patients: MockPatientRepo::empty(),
        links: MockLinkRepo::empty(),
    }
    .execute(Uuid::now_v7(), by_email("new@example.com", Some("   ")))
    .await;

    assert!(matches!(
        result,
        Err(ApiError::Validation(ref msg)) if msg == "displayName is required"
    ));
}

#[tokio::test]
async fn should_create_patient_by_code() {
    let (_, patient) = InviteLinkUseCase {
        patients: MockPatientRepo::empty(),
        links: MockLinkRepo::empty(),
    }
    .execute(
        Uuid::now_v7(),
        PatientSelector {
            patient_code: Some("P-42".to_owned()),
            display_name: Some("Bo".to_owned()),
            ..PatientSelector::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(patient.patient_code.as_deref(), Some("P-42"));
    assert_eq!(patient.email, None);
}

#[tokio::test]
async fn should_prefer_patient_id_over_email() {
    let patient = test_patient("By Id");
    let usecase = InviteLinkUseCase {
        patients: MockPatientRepo::new(vec![patient.clone()]),
        links: MockLinkRepo::empty(),
    };

    let (_, found) = usecase
        .execute(
            Uuid::now_v7(),
            PatientSelector {
                patient_id: Some(patient.id.to_string()),
                patient_email: Some("ignored@example.com".to_owned()),
                ..PatientSelector::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(found.id, patient.id);
}

#[tokio::test]
async fn should_reject_unknown_or_malformed_patient_id() {
    let usecase = InviteLinkUseCase {
        patients: MockPatientRepo::empty(),
        links: MockLinkRepo::empty(),
    };

    let unknown = usecase
        .execute(
            Uuid::now_v7(),
            PatientSelector {
                patient_id: Some(Uuid::now_v7().to_string()),
                ..PatientSelector::default()
            },
        )
        .await;
    assert!(matches!(unknown, Err(ApiError::PatientNotFound)));

    let malformed = usecase
        .execute(
            Uuid::now_v7(),
            PatientSelector {
                patient_id: Some("not-a-uuid".to_owned()),
                ..PatientSelector::default()
            },
        )
        .await;
    assert!(matches!(
        malformed,
        Err(ApiError::Validation(ref msg)) if msg == "invalid patientId"
    ));
}

#[tokio::test]
async fn should_require_some_selector() {
    let result = InviteLinkUseCase {
        patients: MockPatientRepo::empty(),
        links: MockLinkRepo::empty(),
    }
    .execute(Uuid::now_v7(), PatientSelector::default())
    .await;

    assert!(matches!(
        result,
        Err(ApiError::Validation(ref msg)) if msg == "provide patientId, patientEmail, or patientCode"
    ));
}

#[tokio::test]
async fn should_reject_duplicate_link() {
    let patient = test_patient("Ana");
    let doctor_id = Uuid::now_v7();
    let usecase = InviteLinkUseCase {
        patients: MockPatientRepo::new(vec![patient.clone()]),
        links: MockLinkRepo::new(vec![Link::pending(doctor_id, patient.id, Utc::now())]),
    };

    let result = usecase
        .execute(
            doctor_id,
            PatientSelector {
                patient_id: Some(patient.id.to_string()),
                ..PatientSelector::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ApiError::LinkExists)));
}

// ── ApproveLinkUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_approve_pending_link() {
    let patient = test_patient("Ana");
    let doctor_id = Uuid::now_v7();
    let pending = Link::pending(doctor_id, patient.id, Utc::now());

    let (link, approved_patient) = ApproveLinkUseCase {
        links: MockLinkRepo::new(vec![pending.clone()]),
        patients: MockPatientRepo::new(vec![patient.clone()]),
    }
    .execute(pending.id, doctor_id)
    .await
    .unwrap();

    assert_eq!(link.id, pending.id);
    assert_eq!(link.status, LinkStatus::Approved);
    assert_eq!(link.approved_by_doctor_id, Some(doctor_id));
    assert!(link.approved_at.is_some());
    assert_eq!(approved_patient.id, patient.id);
}

#[tokio::test]
async fn should_record_approving_doctor_even_when_not_owner() {
    let patient = test_patient("Ana");
    let owner = Uuid::now_v7();
    let other = Uuid::now_v7();
    let pending = Link::pending(owner, patient.id, Utc::now());

    let (link, _) = ApproveLinkUseCase {
        links: MockLinkRepo::new(vec![pending.clone()]),
        patients: MockPatientRepo::new(vec![patient]),
    }
    .execute(pending.id, other)
    .await
    .unwrap();

    assert_eq!(link.doctor_id, owner);
    assert_eq!(link.approved_by_doctor_id, Some(other));
}

#[tokio::test]
async fn should_report_unknown_link() {
    let result = ApproveLinkUseCase {
        links: MockLinkRepo::empty(),
        patients: MockPatientRepo::empty(),
    }
    .execute(Uuid::now_v7(), Uuid::now_v7())
    .await;

    let err = result.unwrap_err();
    assert!(matches!(err, ApiError::LinkNotFound));
    assert_eq!(err.to_string(), "link not found");
}

// ── ListPatientsUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_approved_patients_and_pending_links() {
    let doctor_id = Uuid::now_v7();
    let approved = test_patient("Approved");
    let pending = test_patient("Pending");
    let foreign = test_patient("Someone else's");
    let pending_link = Link::pending(doctor_id, pending.id, Utc::now());

    let overview = ListPatientsUseCase {
        links: MockLinkRepo::new(vec![
            approved_link(doctor_id, approved.id, Utc::now()),
            pending_link.clone(),
            approved_link(Uuid::now_v7(), foreign.id, Utc::now()),
        ]),
        patients: MockPatientRepo::new(vec![approved.clone(), pending, foreign]),
    }
    .execute(doctor_id)
    .await
    .unwrap();

    assert_eq!(overview.patients.len(), 1);
    assert_eq!(overview.patients[0].id, approved.id);
    assert_eq!(overview.pending_links.len(), 1);
    assert_eq!(overview.pending_links[0].id, pending_link.id);
}

// ── RevokeLinksUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_revoke_only_approved_links_of_patient() {
    let patient_id = Uuid::now_v7();
    let earlier = Utc::now() - Duration::days(3);
    let links = MockLinkRepo::new(vec![
        approved_link(Uuid::now_v7(), patient_id, earlier),
        approved_link(Uuid::now_v7(), patient_id, Utc::now()),
        Link::pending(Uuid::now_v7(), patient_id, Utc::now()),
        approved_link(Uuid::now_v7(), Uuid::now_v7(), Utc::now()),
    ]);
    let links_handle = links.links_handle();

    let revoked = RevokeLinksUseCase { links }.execute(patient_id).await.unwrap();

    assert_eq!(revoked, 2);
    let links = links_handle.lock().unwrap();
    assert_eq!(
        links.iter().filter(|l| l.status == LinkStatus::Revoked).count(),
        2
    );
    assert_eq!(
        links.iter().filter(|l| l.status == LinkStatus::Pending).count(),
        1
    );
}
