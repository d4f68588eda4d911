use chrono::{Duration, Utc};
use uuid::Uuid;

use eloquia_api::domain::types::Practice;
use eloquia_api::error::ApiError;
use eloquia_api::usecase::account::{
    GetMyDoctorUseCase, LoginDoctorUseCase, LoginInput, LoginPatientUseCase,
    RegisterDoctorUseCase, RegisterInput, RegisterPatientUseCase,
};
use eloquia_api::usecase::practice::{CreatePracticeInput, CreatePracticeUseCase};
use eloquia_domain::account::{DoctorRole, PatientStatus};

use crate::helpers::{
    MockDoctorRepo, MockLinkRepo, MockPatientRepo, MockPracticeRepo, approved_link, test_doctor,
    test_hasher, test_patient,
};

fn register_input(email: &str, display_name: &str, password: &str) -> RegisterInput {
    RegisterInput {
        email: email.to_owned(),
        display_name: display_name.to_owned(),
        password: password.to_owned(),
    }
}

fn login_input(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.to_owned(),
        password: password.to_owned(),
    }
}

// ── RegisterDoctorUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_doctor_with_normalized_email_and_hashed_password() {
    let hasher = test_hasher();
    let doctor = RegisterDoctorUseCase {
        doctors: MockDoctorRepo::empty(),
        passwords: hasher.clone(),
    }
    .execute(register_input(" Doc@Example.com ", " Dr. Rivera ", "correct-horse"))
    .await
    .unwrap();

    assert_eq!(doctor.email, "doc@example.com");
    assert_eq!(doctor.display_name, "Dr. Rivera");
    assert_eq!(doctor.role, DoctorRole::Owner);
    assert_eq!(doctor.practice_id, None);
    assert_ne!(doctor.password_hash, "correct-horse");
    assert!(hasher.verify(&doctor.password_hash, "correct-horse"));
}

#[tokio::test]
async fn should_reject_duplicate_doctor_email() {
    let usecase = RegisterDoctorUseCase {
        doctors: MockDoctorRepo::empty(),
        passwords: test_hasher(),
    };
    usecase
        .execute(register_input("doc@example.com", "A", "password-1"))
        .await
        .unwrap();

    let err = usecase
        .execute(register_input("DOC@example.com", "B", "password-2"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::AccountExists));
    assert_eq!(err.to_string(), "an account with that email already exists");
}

#[tokio::test]
async fn should_validate_registration_fields() {
    let usecase = RegisterDoctorUseCase {
        doctors: MockDoctorRepo::empty(),
        passwords: test_hasher(),
    };

    let cases = [
        (register_input("", "A", "password"), "email, displayName, and password are required"),
        (register_input("a@b.co", "  ", "password"), "email, displayName, and password are required"),
        (register_input("a@b.co", "A", ""), "email, displayName, and password are required"),
        (register_input("not-an-email", "A", "password"), "email is invalid"),
        (register_input("a@b.co", "A", "short"), "password must be at least 8 characters"),
    ];
    for (input, expected) in cases {
        let err = usecase.execute(input).await.unwrap_err();
        assert!(
            matches!(err, ApiError::Validation(ref msg) if msg == expected),
            "expected {expected:?}, got {err:?}"
        );
    }
}

// ── LoginDoctorUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_log_in_doctor_with_correct_password_only() {
    let hasher = test_hasher();
    let mut doctor = test_doctor();
    doctor.password_hash = hasher.hash("s3cret-password").unwrap();
    let usecase = LoginDoctorUseCase {
        doctors: MockDoctorRepo::new(vec![doctor.clone()]),
        passwords: hasher,
    };

    let logged_in = usecase
        .execute(login_input(" DOC@example.com", "s3cret-password"))
        .await
        .unwrap();
    assert_eq!(logged_in.id, doctor.id);

    let wrong = usecase
        .execute(login_input("doc@example.com", "s3cret-passwore"))
        .await;
    assert!(matches!(wrong, Err(ApiError::InvalidCredentials)));

    let unknown = usecase
        .execute(login_input("nobody@example.com", "s3cret-password"))
        .await;
    assert!(matches!(unknown, Err(ApiError::InvalidCredentials)));

    let missing = usecase.execute(login_input("doc@example.com", "")).await;
    assert!(matches!(
        missing,
        Err(ApiError::Validation(ref msg)) if msg == "email and password are required"
    ));
}

// ── RegisterPatientUseCase / LoginPatientUseCase ─────────────────────────────

#[tokio::test]
async fn should_register_and_log_in_patient() {
    let hasher = test_hasher();
    let patients = MockPatientRepo::empty();

    let registered = RegisterPatientUseCase {
        patients: patients.clone(),
        passwords: hasher.clone(),
    }
    .execute(register_input("ana@example.com", "Ana", "patient-pass"))
    .await
    .unwrap();
    assert_eq!(registered.status, PatientStatus::Active);
    assert_eq!(registered.email.as_deref(), Some("ana@example.com"));

    let logged_in = LoginPatientUseCase {
        patients,
        passwords: hasher,
    }
    .execute(login_input("ana@example.com", "patient-pass"))
    .await
    .unwrap();
    assert_eq!(logged_in.id, registered.id);
}

#[tokio::test]
async fn should_reject_login_for_invited_patient_without_password() {
    let mut invited = test_patient("Invited");
    invited.email = Some("invited@example.com".to_owned());

    let result = LoginPatientUseCase {
        patients: MockPatientRepo::new(vec![invited]),
        passwords: test_hasher(),
    }
    .execute(login_input("invited@example.com", "anything-at-all"))
    .await;

    assert!(matches!(result, Err(ApiError::InvalidCredentials)));
}

// ── GetMyDoctorUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_doctor_of_latest_approved_link_with_practice() {
    let now = Utc::now();
    let practice = Practice {
        id: Uuid::now_v7(),
        name: "Speech Clinic".to_owned(),
        address: Some("1 Main St".to_owned()),
        logo_url: None,
        created_at: now,
        updated_at: now,
    };
    let older = test_doctor();
    let mut latest = test_doctor();
    latest.email = "latest@example.com".to_owned();
    latest.practice_id = Some(practice.id);
    let patient_id = Uuid::now_v7();
    let doctors = MockDoctorRepo::new(vec![older.clone(), latest.clone()]);

    let my_doctor = GetMyDoctorUseCase {
        links: MockLinkRepo::new(vec![
            approved_link(older.id, patient_id, now - Duration::days(10)),
            approved_link(latest.id, patient_id, now - Duration::days(1)),
        ]),
        doctors: doctors.clone(),
        practices: MockPracticeRepo::new(vec![practice.clone()], doctors),
    }
    .execute(patient_id)
    .await
    .unwrap();

    assert_eq!(my_doctor.doctor.id, latest.id);
    let found = my_doctor.practice.unwrap();
    assert_eq!(found.name, "Speech Clinic");
    assert_eq!(found.address.as_deref(), Some("1 Main St"));
}

#[tokio::test]
async fn should_report_no_doctor_assigned() {
    let doctors = MockDoctorRepo::empty();
    let result = GetMyDoctorUseCase {
        links: MockLinkRepo::empty(),
        doctors: doctors.clone(),
        practices: MockPracticeRepo::new(vec![], doctors),
    }
    .execute(Uuid::now_v7())
    .await;

    let err = result.unwrap_err();
    assert!(matches!(err, ApiError::NoDoctorAssigned));
    assert_eq!(err.to_string(), "no doctor assigned");
}

// ── CreatePracticeUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_make_creator_owner_of_new_practice() {
    let mut doctor = test_doctor();
    doctor.role = DoctorRole::Staff;
    let doctors = MockDoctorRepo::new(vec![doctor.clone()]);

    let (practice, updated) = CreatePracticeUseCase {
        repo: MockPracticeRepo::new(vec![], doctors),
    }
    .execute(
        doctor.id,
        CreatePracticeInput {
            name: "  Speech Clinic ".to_owned(),
            address: None,
            logo_url: Some("https://cdn.example.com/logo.png".to_owned()),
        },
    )
    .await
    .unwrap();

    assert_eq!(practice.name, "Speech Clinic");
    assert_eq!(updated.role, DoctorRole::Owner);
    assert_eq!(updated.practice_id, Some(practice.id));
}

#[tokio::test]
async fn should_require_practice_name() {
    let doctors = MockDoctorRepo::empty();
    let result = CreatePracticeUseCase {
        repo: MockPracticeRepo::new(vec![], doctors),
    }
    .execute(
        Uuid::now_v7(),
        CreatePracticeInput {
            name: " ".to_owned(),
            address: None,
            logo_url: None,
        },
    )
    .await;

    assert!(matches!(
        result,
        Err(ApiError::Validation(ref msg)) if msg == "name is required"
    ));
}
