use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eloquia_domain::entry::Emotion;

use crate::auth::{CurrentDoctor, CurrentPatient};
use crate::error::ApiError;
use crate::handlers::dto::{EntryDto, LinkedPatientDto, SyncEntryDto};
use crate::handlers::link::parse_patient_id;
use crate::handlers::query::ApiQuery;
use crate::state::AppState;
use crate::usecase::entry::{ListPatientEntriesUseCase, RecentEntriesUseCase, recent_limit};
use crate::usecase::sync::{SyncEntriesUseCase, SyncEntryInput, SyncInput};

// ── GET /patients/{id}/entries ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct EntriesQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Serialize)]
pub struct EntriesResponse {
    pub entries: Vec<EntryDto>,
}

pub async fn list_patient_entries(
    CurrentDoctor(doctor): CurrentDoctor,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<EntriesQuery>,
) -> Result<Json<EntriesResponse>, ApiError> {
    let patient_id = parse_patient_id(&id)?;
    let usecase = ListPatientEntriesUseCase {
        links: state.link_repo(),
        entries: state.entry_repo(),
    };
    let entries = usecase
        .execute(
            doctor.id,
            patient_id,
            query.from.as_deref(),
            query.to.as_deref(),
        )
        .await?;
    Ok(Json(EntriesResponse {
        entries: entries.into_iter().map(Into::into).collect(),
    }))
}

// ── GET /entries/recent ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RecentQuery {
    pub limit: Option<String>,
}

#[derive(Serialize)]
pub struct RecentRow {
    pub entry: EntryDto,
    pub patient: LinkedPatientDto,
}

#[derive(Serialize)]
pub struct RecentResponse {
    pub rows: Vec<RecentRow>,
}

pub async fn recent_entries(
    CurrentDoctor(doctor): CurrentDoctor,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RecentQuery>,
) -> Result<Json<RecentResponse>, ApiError> {
    let usecase = RecentEntriesUseCase {
        links: state.link_repo(),
        entries: state.entry_repo(),
        patients: state.patient_repo(),
    };
    let rows = usecase
        .execute(doctor.id, recent_limit(query.limit.as_deref()))
        .await?;
    Ok(Json(RecentResponse {
        rows: rows
            .into_iter()
            .map(|row| RecentRow {
                entry: row.entry.into(),
                patient: row.patient.into(),
            })
            .collect(),
    }))
}

// ── GET|POST /patient/entries/sync ───────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SyncQuery {
    pub updated_since: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncEntryRequest {
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

impl From<SyncEntryRequest> for SyncEntryInput {
    fn from(entry: SyncEntryRequest) -> Self {
        Self {
            id: entry.id,
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

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    pub updated_since: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(default)]
    pub entries: Vec<SyncEntryRequest>,
}

#[derive(Serialize)]
pub struct SyncResponse {
    pub entries: Vec<SyncEntryDto>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// The body is optional; whitespace-only counts as absent.
fn parse_sync_body(body: &Bytes) -> Result<SyncRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SyncRequest::default());
    }
    serde_json::from_slice(body).map_err(|_| ApiError::validation("invalid JSON payload"))
}

pub async fn sync_entries(
    CurrentPatient(patient): CurrentPatient,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SyncQuery>,
    body: Bytes,
) -> Result<Json<SyncResponse>, ApiError> {
    let request = parse_sync_body(&body)?;
    let input = SyncInput {
        updated_since: non_blank(query.updated_since).or(request.updated_since),
        from: non_blank(query.from).or(request.from),
        to: non_blank(query.to).or(request.to),
        entries: request.entries.into_iter().map(Into::into).collect(),
    };
    let usecase = SyncEntriesUseCase {
        entries: state.entry_repo(),
    };
    let entries = usecase.execute(patient.id, input).await?;
    Ok(Json(SyncResponse {
        entries: entries.into_iter().map(Into::into).collect(),
    }))
}
