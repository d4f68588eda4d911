use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use eloquia_domain::account::{DoctorRole, PatientStatus};
use eloquia_domain::entry::Emotion;
use eloquia_domain::link::LinkStatus;

#[derive(Debug, Clone)]
pub struct Doctor {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: DoctorRole,
    pub practice_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Patient record. Invite-created patients carry no password hash and can
/// not log in until they have one.
#[derive(Debug, Clone)]
pub struct Patient {
    pub id: Uuid,
    pub display_name: String,
    pub birth_date: Option<NaiveDate>,
    pub status: PatientStatus,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub patient_code: Option<String>,
    pub last_entry_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    pub fn new(display_name: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            display_name,
            birth_date: None,
            status: PatientStatus::default(),
            email: None,
            password_hash: None,
            patient_code: None,
            last_entry_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Practice {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Link {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub status: LinkStatus,
    pub requested_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by_doctor_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    pub fn pending(doctor_id: Uuid, patient_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            doctor_id,
            patient_id,
            status: LinkStatus::Pending,
            requested_at: now,
            approved_at: None,
            approved_by_doctor_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Short-lived pairing code issued to a doctor.
#[derive(Debug, Clone)]
pub struct PairingCode {
    pub id: Uuid,
    pub code: String,
    pub doctor_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub consumed_at: Option<DateTime<Utc>>,
    pub consumed_by_patient_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl PairingCode {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.consumed_at.is_none() && self.expires_at > now
    }
}

/// Outcome of a successful redemption.
#[derive(Debug, Clone)]
pub struct Redemption {
    pub code: PairingCode,
    pub link: Link,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub happened_at: DateTime<Utc>,
    pub situation: Option<String>,
    pub emotions: Option<Vec<Emotion>>,
    pub triggers: Option<Vec<String>>,
    pub techniques: Option<Vec<String>>,
    pub stutter_frequency: Option<i32>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One entry as uploaded by the mobile client during sync.
#[derive(Debug, Clone, Default)]
pub struct EntryUpload {
    pub id: Uuid,
    pub happened_at: DateTime<Utc>,
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

impl EntryUpload {
    /// Build a new entry owned by `patient_id`.
    pub fn into_entry(self, patient_id: Uuid, now: DateTime<Utc>) -> Entry {
        Entry {
            id: self.id,
            patient_id,
            happened_at: self.happened_at,
            situation: self.situation,
            emotions: self.emotions,
            triggers: self.triggers,
            techniques: self.techniques,
            stutter_frequency: self.stutter_frequency,
            notes: self.notes.filter(|notes| !notes.is_empty()),
            tags: self.tags,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        }
    }

    /// Apply the upload to an existing entry. Notes are always overwritten
    /// (empty clears them); every other optional field only replaces the
    /// stored value when present.
    pub fn apply_to(self, entry: &mut Entry, now: DateTime<Utc>) {
        entry.happened_at = self.happened_at;
        entry.updated_at = self.updated_at.unwrap_or(now);
        entry.notes = self.notes.filter(|notes| !notes.is_empty());
        if let Some(tags) = self.tags {
            entry.tags = Some(tags);
        }
        if let Some(situation) = self.situation {
            entry.situation = Some(situation);
        }
        if let Some(emotions) = self.emotions {
            entry.emotions = Some(emotions);
        }
        if let Some(triggers) = self.triggers {
            entry.triggers = Some(triggers);
        }
        if let Some(techniques) = self.techniques {
            entry.techniques = Some(techniques);
        }
        if let Some(stutter_frequency) = self.stutter_frequency {
            entry.stutter_frequency = Some(stutter_frequency);
        }
    }
}

/// Optional bounds applied when listing a patient's entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryFilter {
    /// `updated_at > updated_since`
    pub updated_since: Option<DateTime<Utc>>,
    /// `happened_at >= from`
    pub from: Option<DateTime<Utc>>,
    /// `happened_at <= to`
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOrder {
    OldestFirst,
    NewestFirst,
}

/// Default and bounds for `GET /entries/recent?limit=`.
pub const RECENT_ENTRIES_DEFAULT_LIMIT: u64 = 5;
pub const RECENT_ENTRIES_MAX_LIMIT: u64 = 20;
