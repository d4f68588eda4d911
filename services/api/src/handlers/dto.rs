//! JSON response bodies shared across handlers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use eloquia_domain::account::{DoctorRole, PatientStatus};
use eloquia_domain::entry::Emotion;
use eloquia_domain::link::LinkStatus;

use crate::domain::types::{Doctor, Entry, Link, Patient, Practice};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDto {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: DoctorRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub practice_id: Option<Uuid>,
}

impl From<Doctor> for DoctorDto {
    fn from(doctor: Doctor) -> Self {
        Self {
            id: doctor.id,
            email: doctor.email,
            display_name: doctor.display_name,
            role: doctor.role,
            practice_id: doctor.practice_id,
        }
    }
}

/// A patient as seen by the patient themselves.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientAccountDto {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub status: PatientStatus,
}

impl From<Patient> for PatientAccountDto {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            email: patient.email.unwrap_or_default(),
            display_name: patient.display_name,
            status: patient.status,
        }
    }
}

/// A patient as seen by a linked doctor.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedPatientDto {
    pub id: Uuid,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_code: Option<String>,
}

impl From<Patient> for LinkedPatientDto {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            display_name: patient.display_name,
            email: patient.email,
            patient_code: patient.patient_code,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDto {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub status: LinkStatus,
    #[serde(serialize_with = "eloquia_core::serde::to_rfc3339_ms")]
    pub requested_at: DateTime<Utc>,
    #[serde(
        serialize_with = "eloquia_core::serde::to_rfc3339_ms_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub approved_at: Option<DateTime<Utc>>,
}

impl From<Link> for LinkDto {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            doctor_id: link.doctor_id,
            patient_id: link.patient_id,
            status: link.status,
            requested_at: link.requested_at,
            approved_at: link.approved_at,
        }
    }
}

/// `{link, patient}` body returned by every link-changing endpoint.
#[derive(Debug, Serialize)]
pub struct LinkWithPatient {
    pub link: LinkDto,
    pub patient: LinkedPatientDto,
}

impl LinkWithPatient {
    pub fn new(link: Link, patient: Patient) -> Self {
        Self {
            link: link.into(),
            patient: patient.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl From<Practice> for PracticeDto {
    fn from(practice: Practice) -> Self {
        Self {
            id: practice.id,
            name: practice.name,
            address: practice.address,
            logo_url: practice.logo_url,
        }
    }
}

/// Entry as read by a linked doctor.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDto {
    pub id: Uuid,
    pub patient_id: Uuid,
    #[serde(serialize_with = "eloquia_core::serde::to_rfc3339_ms")]
    pub happened_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub situation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotions: Option<Vec<Emotion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub techniques: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stutter_frequency: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(serialize_with = "eloquia_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "eloquia_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Entry> for EntryDto {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            patient_id: entry.patient_id,
            happened_at: entry.happened_at,
            situation: entry.situation,
            emotions: entry.emotions,
            triggers: entry.triggers,
            techniques: entry.techniques,
            stutter_frequency: entry.stutter_frequency,
            notes: entry.notes,
            tags: entry.tags,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

/// Entry as returned to the owning patient's device. `notes` and `tags` are
/// always present so the client can overwrite its local copy.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncEntryDto {
    pub id: Uuid,
    #[serde(serialize_with = "eloquia_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "eloquia_core::serde::to_rfc3339_ms")]
    pub happened_at: DateTime<Utc>,
    pub notes: String,
    pub tags: Vec<String>,
    #[serde(serialize_with = "eloquia_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub situation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotions: Option<Vec<Emotion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub techniques: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stutter_frequency: Option<i32>,
}

impl From<Entry> for SyncEntryDto {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            created_at: entry.created_at,
            happened_at: entry.happened_at,
            notes: entry.notes.unwrap_or_default(),
            tags: entry.tags.unwrap_or_default(),
            updated_at: entry.updated_at,
            situation: entry.situation,
            emotions: entry.emotions,
            triggers: entry.triggers,
            techniques: entry.techniques,
            stutter_frequency: entry.stutter_frequency,
        }
    }
}
