use chrono::Utc;
use uuid::Uuid;

use eloquia_auth_types::password::PasswordHasher;
use eloquia_domain::account::{DoctorRole, is_valid_email, normalize_email};

use crate::domain::repository::{
    DoctorRepository, LinkRepository, PatientRepository, PracticeRepository,
};
use crate::domain::types::{Doctor, Patient, Practice};
use crate::error::ApiError;

pub struct RegisterInput {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Normalized registration fields plus the password hash.
struct Registration {
    email: String,
    display_name: String,
    password_hash: String,
}

async fn validate_registration(
    input: RegisterInput,
    passwords: &PasswordHasher,
) -> Result<Registration, ApiError> {
    let email = normalize_email(&input.email);
    let display_name = input.display_name.trim().to_owned();
    if email.is_empty() || display_name.is_empty() || input.password.is_empty() {
        return Err(ApiError::validation(
            "email, displayName, and password are required",
        ));
    }
    if !is_valid_email(&email) {
        return Err(ApiError::validation("email is invalid"));
    }
    let password_hash = passwords.spawn_hash(input.password).await?;
    Ok(Registration {
        email,
        display_name,
        password_hash,
    })
}

fn validate_login(input: &LoginInput) -> Result<String, ApiError> {
    let email = normalize_email(&input.email);
    if email.is_empty() || input.password.is_empty() {
        return Err(ApiError::validation("email and password are required"));
    }
    Ok(email)
}

// ── RegisterDoctor ───────────────────────────────────────────────────────────

pub struct RegisterDoctorUseCase<D: DoctorRepository> {
    pub doctors: D,
    pub passwords: PasswordHasher,
}

impl<D: DoctorRepository> RegisterDoctorUseCase<D> {
    pub async fn execute(&self, input: RegisterInput) -> Result<Doctor, ApiError> {
        let registration = validate_registration(input, &self.passwords).await?;
        let now = Utc::now();
        let doctor = Doctor {
            id: Uuid::now_v7(),
            email: registration.email,
            display_name: registration.display_name,
            password_hash: registration.password_hash,
            role: DoctorRole::default(),
            practice_id: None,
            created_at: now,
            updated_at: now,
        };
        if !self.doctors.create(&doctor).await? {
            return Err(ApiError::AccountExists);
        }
        tracing::info!(doctor_id = %doctor.id, "doctor registered");
        Ok(doctor)
    }
}

// ── LoginDoctor ──────────────────────────────────────────────────────────────

pub struct LoginDoctorUseCase<D: DoctorRepository> {
    pub doctors: D,
    pub passwords: PasswordHasher,
}

impl<D: DoctorRepository> LoginDoctorUseCase<D> {
    pub async fn execute(&self, input: LoginInput) -> Result<Doctor, ApiError> {
        let email = validate_login(&input)?;
        let doctor = self
            .doctors
            .find_by_email(&email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;
        if !self
            .passwords
            .spawn_verify(doctor.password_hash.clone(), input.password)
            .await?
        {
            return Err(ApiError::InvalidCredentials);
        }
        Ok(doctor)
    }
}

// ── RegisterPatient ──────────────────────────────────────────────────────────

pub struct RegisterPatientUseCase<P: PatientRepository> {
    pub patients: P,
    pub passwords: PasswordHasher,
}

impl<P: PatientRepository> RegisterPatientUseCase<P> {
    pub async fn execute(&self, input: RegisterInput) -> Result<Patient, ApiError> {
        let registration = validate_registration(input, &self.passwords).await?;
        let mut patient = Patient::new(registration.display_name, Utc::now());
        patient.email = Some(registration.email);
        patient.password_hash = Some(registration.password_hash);
        if !self.patients.create(&patient).await? {
            return Err(ApiError::AccountExists);
        }
        tracing::info!(patient_id = %patient.id, "patient registered");
        Ok(patient)
    }
}

// ── LoginPatient ─────────────────────────────────────────────────────────────

pub struct LoginPatientUseCase<P: PatientRepository> {
    pub patients: P,
    pub passwords: PasswordHasher,
}

impl<P: PatientRepository> LoginPatientUseCase<P> {
    pub async fn execute(&self, input: LoginInput) -> Result<Patient, ApiError> {
        let email = validate_login(&input)?;
        let patient = self
            .patients
            .find_by_email(&email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;
        // Invite-created patients have no password yet.
        let hash = patient
            .password_hash
            .as_deref()
            .filter(|hash| !hash.trim().is_empty())
            .ok_or(ApiError::InvalidCredentials)?;
        if !self
            .passwords
            .spawn_verify(hash.to_owned(), input.password)
            .await?
        {
            return Err(ApiError::InvalidCredentials);
        }
        Ok(patient)
    }
}

// ── GetMyDoctor ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct MyDoctor {
    pub doctor: Doctor,
    pub practice: Option<Practice>,
}

pub struct GetMyDoctorUseCase<L, D, P>
where
    L: LinkRepository,
    D: DoctorRepository,
    P: PracticeRepository,
{
    pub links: L,
    pub doctors: D,
    pub practices: P,
}

impl<L, D, P> GetMyDoctorUseCase<L, D, P>
where
    L: LinkRepository,
    D: DoctorRepository,
    P: PracticeRepository,
{
    pub async fn execute(&self, patient_id: Uuid) -> Result<MyDoctor, ApiError> {
        let link = self
            .links
            .latest_approved_for_patient(patient_id)
            .await?
            .ok_or(ApiError::NoDoctorAssigned)?;
        let doctor = self
            .doctors
            .find_by_id(link.doctor_id)
            .await?
            .ok_or_else(|| {
                ApiError::Internal(anyhow::anyhow!("link {} references missing doctor", link.id))
            })?;
        let practice = match doctor.practice_id {
            Some(id) => self.practices.find_by_id(id).await?,
            None => None,
        };
        Ok(MyDoctor { doctor, practice })
    }
}
