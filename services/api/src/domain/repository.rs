#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use eloquia_domain::link::LinkStatus;

use crate::domain::types::{
    Doctor, Entry, EntryFilter, EntryOrder, Link, PairingCode, Patient, Practice, Redemption,
};
use crate::error::ApiError;

/// Repository for doctor accounts.
pub trait DoctorRepository: Send + Sync {
    /// Insert a doctor. Returns `false` if the email is already taken.
    async fn create(&self, doctor: &Doctor) -> Result<bool, ApiError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Doctor>, ApiError>;

    /// Look up by normalized (lowercase) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Doctor>, ApiError>;
}

/// Repository for patient records.
pub trait PatientRepository: Send + Sync {
    /// Insert a patient. Returns `false` if the email or patient code is
    /// already taken.
    async fn create(&self, patient: &Patient) -> Result<bool, ApiError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>, ApiError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Patient>, ApiError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<Patient>, ApiError>;

    /// Load every patient in `ids`; unknown ids are skipped.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Patient>, ApiError>;
}

/// Repository for practices.
pub trait PracticeRepository: Send + Sync {
    /// Insert the practice and make `owner_id` its Owner in one transaction.
    /// Returns the updated doctor.
    async fn create_with_owner(
        &self,
        practice: &Practice,
        owner_id: Uuid,
    ) -> Result<Doctor, ApiError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Practice>, ApiError>;
}

/// Repository for doctor-patient links.
pub trait LinkRepository: Send + Sync {
    /// Insert a link. Returns `false` if the `(doctor, patient)` pair exists.
    async fn create(&self, link: &Link) -> Result<bool, ApiError>;

    /// Set a link Approved and stamp the audit fields. `None` if unknown.
    async fn approve(
        &self,
        id: Uuid,
        approved_by: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<Link>, ApiError>;

    async fn list_by_doctor(
        &self,
        doctor_id: Uuid,
        status: LinkStatus,
    ) -> Result<Vec<Link>, ApiError>;

    async fn has_approved(&self, doctor_id: Uuid, patient_id: Uuid) -> Result<bool, ApiError>;

    /// The patient's Approved link with the latest `approved_at`.
    async fn latest_approved_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Option<Link>, ApiError>;

    /// Move every Approved link of the patient to Revoked. Returns the count.
    async fn revoke_approved_for_patient(
        &self,
        patient_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64, ApiError>;
}

/// Repository for pairing codes.
pub trait PairingCodeRepository: Send + Sync {
    /// Expire every active code of the doctor by setting `expires_at = now`.
    async fn expire_active_for_doctor(
        &self,
        doctor_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64, ApiError>;

    /// Whether any doctor holds an active code with this value.
    async fn exists_active(&self, code: &str, now: DateTime<Utc>) -> Result<bool, ApiError>;

    /// Insert a code. Returns `false` if a unique constraint rejects it.
    async fn create(&self, code: &PairingCode) -> Result<bool, ApiError>;

    /// Consume the most-recently-expiring active code with this value for
    /// `patient_id` and approve the `(doctor, patient)` link, atomically.
    ///
    /// Fails with `PairingCodeNotFound` when no active code exists or the
    /// conditional consume loses a race.
    async fn redeem(
        &self,
        code: &str,
        patient_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Redemption, ApiError>;
}

/// Repository for journal entries.
pub trait EntryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Entry>, ApiError>;

    async fn create(&self, entry: &Entry) -> Result<(), ApiError>;

    async fn update(&self, entry: &Entry) -> Result<(), ApiError>;

    async fn list_for_patient(
        &self,
        patient_id: Uuid,
        filter: EntryFilter,
        order: EntryOrder,
    ) -> Result<Vec<Entry>, ApiError>;

    /// Newest entries across the given patients, at most `limit`.
    async fn recent_for_patients(
        &self,
        patient_ids: &[Uuid],
        limit: u64,
    ) -> Result<Vec<Entry>, ApiError>;
}
