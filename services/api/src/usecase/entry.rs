use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use eloquia_domain::link::LinkStatus;

use crate::domain::repository::{EntryRepository, LinkRepository, PatientRepository};
use crate::domain::types::{
    Entry, EntryFilter, EntryOrder, Patient, RECENT_ENTRIES_DEFAULT_LIMIT, RECENT_ENTRIES_MAX_LIMIT,
};
use crate::error::ApiError;
use crate::usecase::link::ensure_approved_link;

/// Parse an optional RFC 3339 timestamp; blank counts as absent.
pub fn parse_timestamp(
    raw: Option<&str>,
    message: &'static str,
) -> Result<Option<DateTime<Utc>>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|t| Some(t.with_timezone(&Utc)))
            .map_err(|_| ApiError::validation(message)),
    }
}

/// `limit` query value: default when absent or unparsable, clamped to
/// `[1, RECENT_ENTRIES_MAX_LIMIT]`.
pub fn recent_limit(raw: Option<&str>) -> u64 {
    let requested = raw
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(RECENT_ENTRIES_DEFAULT_LIMIT as i64);
    requested.clamp(1, RECENT_ENTRIES_MAX_LIMIT as i64) as u64
}

// ── ListPatientEntries ───────────────────────────────────────────────────────

pub struct ListPatientEntriesUseCase<L, E>
where
    L: LinkRepository,
    E: EntryRepository,
{
    pub links: L,
    pub entries: E,
}

impl<L, E> ListPatientEntriesUseCase<L, E>
where
    L: LinkRepository,
    E: EntryRepository,
{
    /// Entries of a linked patient in ascending `happened_at` order, bounded
    /// by optional RFC 3339 `from` / `to`.
    pub async fn execute(
        &self,
        doctor_id: Uuid,
        patient_id: Uuid,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<Entry>, ApiError> {
        ensure_approved_link(&self.links, doctor_id, patient_id).await?;
        let filter = EntryFilter {
            updated_since: None,
            from: parse_timestamp(from, "invalid time range")?,
            to: parse_timestamp(to, "invalid time range")?,
        };
        self.entries
            .list_for_patient(patient_id, filter, EntryOrder::OldestFirst)
            .await
    }
}

// ── RecentEntries ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RecentEntryRow {
    pub entry: Entry,
    pub patient: Patient,
}

pub struct RecentEntriesUseCase<L, E, P>
where
    L: LinkRepository,
    E: EntryRepository,
    P: PatientRepository,
{
    pub links: L,
    pub entries: E,
    pub patients: P,
}

impl<L, E, P> RecentEntriesUseCase<L, E, P>
where
    L: LinkRepository,
    E: EntryRepository,
    P: PatientRepository,
{
    /// Newest entries across every patient the doctor has an Approved link
    /// to, each paired with its patient.
    pub async fn execute(
        &self,
        doctor_id: Uuid,
        limit: u64,
    ) -> Result<Vec<RecentEntryRow>, ApiError> {
        let approved = self
            .links
            .list_by_doctor(doctor_id, LinkStatus::Approved)
            .await?;
        if approved.is_empty() {
            return Ok(Vec::new());
        }
        let patient_ids: Vec<Uuid> = approved.iter().map(|link| link.patient_id).collect();

        let entries = self.entries.recent_for_patients(&patient_ids, limit).await?;
        let patients: HashMap<Uuid, Patient> = self
            .patients
            .find_many(&patient_ids)
            .await?
            .into_iter()
            .map(|patient| (patient.id, patient))
            .collect();

        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                let patient = patients.get(&entry.patient_id)?.clone();
                Some(RecentEntryRow { entry, patient })
            })
            .collect())
    }
}
