use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{CurrentDoctor, CurrentPatient};
use crate::error::ApiError;
use crate::handlers::dto::{LinkDto, LinkWithPatient, LinkedPatientDto};
use crate::handlers::json::ApiJson;
use crate::state::AppState;
use crate::usecase::link::{
    ApproveLinkUseCase, InviteLinkUseCase, ListPatientsUseCase, PatientSelector,
    RevokeLinksUseCase,
};

// ── POST /links/invite, POST /links/request ──────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteRequest {
    pub patient_id: Option<String>,
    pub patient_email: Option<String>,
    pub patient_code: Option<String>,
    pub display_name: Option<String>,
}

pub async fn invite_link(
    CurrentDoctor(doctor): CurrentDoctor,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<InviteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = InviteLinkUseCase {
        patients: state.patient_repo(),
        links: state.link_repo(),
    };
    let (link, patient) = usecase
        .execute(
            doctor.id,
            PatientSelector {
                patient_id: body.patient_id,
                patient_email: body.patient_email,
                patient_code: body.patient_code,
                display_name: body.display_name,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(LinkWithPatient::new(link, patient))))
}

// ── POST /links/{id}/approve ─────────────────────────────────────────────────

pub async fn approve_link(
    CurrentDoctor(doctor): CurrentDoctor,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LinkWithPatient>, ApiError> {
    let link_id: Uuid = id
        .parse()
        .map_err(|_| ApiError::validation("invalid link id"))?;
    let usecase = ApproveLinkUseCase {
        links: state.link_repo(),
        patients: state.patient_repo(),
    };
    let (link, patient) = usecase.execute(link_id, doctor.id).await?;
    Ok(Json(LinkWithPatient::new(link, patient)))
}

// ── GET /patients ────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientsResponse {
    pub patients: Vec<LinkedPatientDto>,
    pub pending_links: Vec<LinkDto>,
}

pub async fn list_patients(
    CurrentDoctor(doctor): CurrentDoctor,
    State(state): State<AppState>,
) -> Result<Json<PatientsResponse>, ApiError> {
    let usecase = ListPatientsUseCase {
        links: state.link_repo(),
        patients: state.patient_repo(),
    };
    let overview = usecase.execute(doctor.id).await?;
    Ok(Json(PatientsResponse {
        patients: overview.patients.into_iter().map(Into::into).collect(),
        pending_links: overview.pending_links.into_iter().map(Into::into).collect(),
    }))
}

// ── POST /links/revoke ───────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RevokeResponse {
    pub revoked: u64,
}

pub async fn revoke_links(
    CurrentPatient(patient): CurrentPatient,
    State(state): State<AppState>,
) -> Result<Json<RevokeResponse>, ApiError> {
    let usecase = RevokeLinksUseCase {
        links: state.link_repo(),
    };
    let revoked = usecase.execute(patient.id).await?;
    Ok(Json(RevokeResponse { revoked }))
}

/// Parse a `{id}` path segment naming a patient.
pub(crate) fn parse_patient_id(raw: &str) -> Result<Uuid, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation("invalid patient id"))
}
