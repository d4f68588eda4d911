use chrono::Utc;
use uuid::Uuid;

use eloquia_domain::account::normalize_email;
use eloquia_domain::link::LinkStatus;

use crate::domain::repository::{LinkRepository, PatientRepository};
use crate::domain::types::{Link, Patient};
use crate::error::ApiError;

/// Fail with `NoApprovedLink` unless the doctor holds an Approved link to
/// the patient.
pub async fn ensure_approved_link<L: LinkRepository>(
    links: &L,
    doctor_id: Uuid,
    patient_id: Uuid,
) -> Result<(), ApiError> {
    if links.has_approved(doctor_id, patient_id).await? {
        Ok(())
    } else {
        Err(ApiError::NoApprovedLink)
    }
}

/// How the inviting doctor identifies the patient. Resolution order is id,
/// then email, then patient code.
#[derive(Debug, Default)]
pub struct PatientSelector {
    pub patient_id: Option<String>,
    pub patient_email: Option<String>,
    pub patient_code: Option<String>,
    pub display_name: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

// ── InviteLink ───────────────────────────────────────────────────────────────

pub struct InviteLinkUseCase<P, L>
where
    P: PatientRepository,
    L: LinkRepository,
{
    pub patients: P,
    pub links: L,
}

impl<P, L> InviteLinkUseCase<P, L>
where
    P: PatientRepository,
    L: LinkRepository,
{
    /// Resolve (or create) the patient and open a Pending link to them.
    pub async fn execute(
        &self,
        doctor_id: Uuid,
        selector: PatientSelector,
    ) -> Result<(Link, Patient), ApiError> {
        let patient = self.resolve_patient(&selector).await?;
        let link = Link::pending(doctor_id, patient.id, Utc::now());
        if !self.links.create(&link).await? {
            return Err(ApiError::LinkExists);
        }
        tracing::info!(
            link_id = %link.id,
            doctor_id = %doctor_id,
            patient_id = %patient.id,
            "link invited"
        );
        Ok((link, patient))
    }

    async fn resolve_patient(&self, selector: &PatientSelector) -> Result<Patient, ApiError> {
        if let Some(raw) = non_blank(selector.patient_id.as_deref()) {
            let id: Uuid = raw
                .parse()
                .map_err(|_| ApiError::validation("invalid patientId"))?;
            return self
                .patients
                .find_by_id(id)
                .await?
                .ok_or(ApiError::PatientNotFound);
        }

        if let Some(raw) = non_blank(selector.patient_email.as_deref()) {
            let email = normalize_email(raw);
            if let Some(patient) = self.patients.find_by_email(&email).await? {
                return Ok(patient);
            }
            let mut patient = Patient::new(required_display_name(selector)?, Utc::now());
            patient.email = Some(email.clone());
            if self.patients.create(&patient).await? {
                return Ok(patient);
            }
            // Lost a race with a concurrent create; use the winner.
            return self
                .patients
                .find_by_email(&email)
                .await?
                .ok_or(ApiError::PatientNotFound);
        }

        if let Some(code) = non_blank(selector.patient_code.as_deref()) {
            if let Some(patient) = self.patients.find_by_code(code).await? {
                return Ok(patient);
            }
            let mut patient = Patient::new(required_display_name(selector)?, Utc::now());
            patient.patient_code = Some(code.to_owned());
            if self.patients.create(&patient).await? {
                return Ok(patient);
            }
            return self
                .patients
                .find_by_code(code)
                .await?
                .ok_or(ApiError::PatientNotFound);
        }

        Err(ApiError::validation(
            "provide patientId, patientEmail, or patientCode",
        ))
    }
}

fn required_display_name(selector: &PatientSelector) -> Result<String, ApiError> {
    non_blank(selector.display_name.as_deref())
        .map(str::to_owned)
        .ok_or_else(|| ApiError::validation("displayName is required"))
}

// ── ApproveLink ──────────────────────────────────────────────────────────────

pub struct ApproveLinkUseCase<L, P>
where
    L: LinkRepository,
    P: PatientRepository,
{
    pub links: L,
    pub patients: P,
}

impl<L, P> ApproveLinkUseCase<L, P>
where
    L: LinkRepository,
    P: PatientRepository,
{
    /// Approve any link by id. The approving doctor is recorded but not
    /// required to own the link; a mismatch is logged.
    pub async fn execute(
        &self,
        link_id: Uuid,
        approving_doctor_id: Uuid,
    ) -> Result<(Link, Patient), ApiError> {
        let link = self
            .links
            .approve(link_id, approving_doctor_id, Utc::now())
            .await?
            .ok_or(ApiError::LinkNotFound)?;
        if link.doctor_id != approving_doctor_id {
            tracing::warn!(
                link_id = %link.id,
                link_doctor_id = %link.doctor_id,
                approving_doctor_id = %approving_doctor_id,
                "link approved by a doctor other than its owner"
            );
        }
        let patient = self
            .patients
            .find_by_id(link.patient_id)
            .await?
            .ok_or_else(|| {
                ApiError::Internal(anyhow::anyhow!("link {} references missing patient", link.id))
            })?;
        Ok((link, patient))
    }
}

// ── ListPatients ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct PatientOverview {
    pub patients: Vec<Patient>,
    pub pending_links: Vec<Link>,
}

pub struct ListPatientsUseCase<L, P>
where
    L: LinkRepository,
    P: PatientRepository,
{
    pub links: L,
    pub patients: P,
}

impl<L, P> ListPatientsUseCase<L, P>
where
    L: LinkRepository,
    P: PatientRepository,
{
    pub async fn execute(&self, doctor_id: Uuid) -> Result<PatientOverview, ApiError> {
        let approved = self
            .links
            .list_by_doctor(doctor_id, LinkStatus::Approved)
            .await?;
        let ids: Vec<Uuid> = approved.iter().map(|link| link.patient_id).collect();
        let patients = self.patients.find_many(&ids).await?;
        let pending_links = self
            .links
            .list_by_doctor(doctor_id, LinkStatus::Pending)
            .await?;
        Ok(PatientOverview {
            patients,
            pending_links,
        })
    }
}

// ── RevokeLinks ──────────────────────────────────────────────────────────────

pub struct RevokeLinksUseCase<L: LinkRepository> {
    pub links: L,
}

impl<L: LinkRepository> RevokeLinksUseCase<L> {
    /// Revoke every Approved link of the patient. Returns how many changed.
    pub async fn execute(&self, patient_id: Uuid) -> Result<u64, ApiError> {
        let revoked = self
            .links
            .revoke_approved_for_patient(patient_id, Utc::now())
            .await?;
        tracing::info!(patient_id = %patient_id, revoked, "links revoked");
        Ok(revoked)
    }
}
