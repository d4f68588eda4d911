use chrono::{DateTime, Utc};
use uuid::Uuid;

use eloquia_domain::entry::Emotion;

use crate::domain::repository::EntryRepository;
use crate::domain::types::{Entry, EntryFilter, EntryOrder, EntryUpload};
use crate::error::ApiError;
use crate::usecase::entry::parse_timestamp;

/// One uploaded entry before validation.
#[derive(Debug, Default)]
pub struct SyncEntryInput {
    pub id: Option<String>,
    pub happened_at: Option<DateTime<Utc>>,
    pub situation: Option<String>,
    pub emotions: Option<Vec<Emotion>>,
    pub triggers: Option<Vec<String>>,
    pub techniques: Option<Vec<String>>,
    pub stutter_frequency: Option<i32>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl SyncEntryInput {
    fn validate(self) -> Result<EntryUpload, ApiError> {
        let raw_id = self
            .id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::validation("entry missing id"))?;
        let id: Uuid = raw_id
            .parse()
            .map_err(|_| ApiError::validation("invalid entry id"))?;
        let happened_at = self
            .happened_at
            .ok_or_else(|| ApiError::validation("entry missing happenedAt"))?;
        Ok(EntryUpload {
            id,
            happened_at,
            situation: self.situation,
            emotions: self.emotions,
            triggers: self.triggers,
            techniques: self.techniques,
            stutter_frequency: self.stutter_frequency,
            notes: self.notes,
            tags: self.tags,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Resolved sync parameters. Query values already take precedence over body
/// values by the time they reach here.
#[derive(Debug, Default)]
pub struct SyncInput {
    pub updated_since: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub entries: Vec<SyncEntryInput>,
}

// ── SyncEntries ──────────────────────────────────────────────────────────────

pub struct SyncEntriesUseCase<E: EntryRepository> {
    pub entries: E,
}

impl<E: EntryRepository> SyncEntriesUseCase<E> {
    /// Apply any uploaded entries, then return the patient's entries newest
    /// first. With an upload the filters are ignored and the full set comes
    /// back so the client can verify server state.
    pub async fn execute(&self, patient_id: Uuid, input: SyncInput) -> Result<Vec<Entry>, ApiError> {
        let uploads = input
            .entries
            .into_iter()
            .map(SyncEntryInput::validate)
            .collect::<Result<Vec<_>, _>>()?;

        let filter = if uploads.is_empty() {
            EntryFilter {
                updated_since: parse_timestamp(input.updated_since.as_deref(), "invalid updatedSince")?,
                from: parse_timestamp(input.from.as_deref(), "invalid from")?,
                to: parse_timestamp(input.to.as_deref(), "invalid to")?,
            }
        } else {
            self.apply_uploads(patient_id, uploads).await?;
            EntryFilter::default()
        };

        self.entries
            .list_for_patient(patient_id, filter, EntryOrder::NewestFirst)
            .await
    }

    async fn apply_uploads(&self, patient_id: Uuid, uploads: Vec<EntryUpload>) -> Result<(), ApiError> {
        let count = uploads.len();
        let now = Utc::now();
        for upload in uploads {
            match self.entries.find_by_id(upload.id).await? {
                None => {
                    let entry = upload.into_entry(patient_id, now);
                    self.entries.create(&entry).await?;
                }
                Some(existing) if existing.patient_id != patient_id => {
                    tracing::warn!(
                        entry_id = %existing.id,
                        entry_patient_id = %existing.patient_id,
                        session_patient_id = %patient_id,
                        "entry patient mismatch"
                    );
                    return Err(ApiError::EntryNotOwned);
                }
                Some(mut existing) => {
                    upload.apply_to(&mut existing, now);
                    self.entries.update(&existing).await?;
                }
            }
        }
        tracing::info!(patient_id = %patient_id, count, "entries uploaded");
        Ok(())
    }
}
