use chrono::Utc;
use uuid::Uuid;

use eloquia_domain::analytics::{EntrySample, PatientAnalytics, RangeDays};

use crate::domain::repository::{EntryRepository, LinkRepository};
use crate::domain::types::{EntryFilter, EntryOrder};
use crate::error::ApiError;
use crate::usecase::link::ensure_approved_link;

// ── PatientAnalytics ─────────────────────────────────────────────────────────

pub struct PatientAnalyticsUseCase<L, E>
where
    L: LinkRepository,
    E: EntryRepository,
{
    pub links: L,
    pub entries: E,
}

impl<L, E> PatientAnalyticsUseCase<L, E>
where
    L: LinkRepository,
    E: EntryRepository,
{
    pub async fn execute(
        &self,
        doctor_id: Uuid,
        patient_id: Uuid,
        range: RangeDays,
    ) -> Result<PatientAnalytics, ApiError> {
        ensure_approved_link(&self.links, doctor_id, patient_id).await?;

        let (from, to) = range.window(Utc::now());
        let filter = EntryFilter {
            updated_since: None,
            from: Some(from),
            to: Some(to),
        };
        let entries = self
            .entries
            .list_for_patient(patient_id, filter, EntryOrder::OldestFirst)
            .await?;

        let samples = entries.iter().map(|entry| EntrySample {
            happened_at: entry.happened_at,
            emotions: entry.emotions.as_deref().unwrap_or_default(),
            triggers: entry.triggers.as_deref().unwrap_or_default(),
            techniques: entry.techniques.as_deref().unwrap_or_default(),
            stutter_frequency: entry.stutter_frequency,
        });
        Ok(PatientAnalytics::aggregate(range, samples))
    }
}
