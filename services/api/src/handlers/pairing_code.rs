use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{CurrentDoctor, CurrentPatient};
use crate::error::ApiError;
use crate::handlers::dto::LinkWithPatient;
use crate::handlers::json::ApiJson;
use crate::state::AppState;
use crate::usecase::pairing::{CreatePairingCodeUseCase, RedeemPairingCodeUseCase};

// ── POST /links/pairing-code ─────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingCodeResponse {
    pub code: String,
    #[serde(serialize_with = "eloquia_core::serde::to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
    pub qr_text: String,
}

pub async fn create_pairing_code(
    CurrentDoctor(doctor): CurrentDoctor,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = CreatePairingCodeUseCase {
        repo: state.pairing_code_repo(),
    };
    let code = usecase.execute(doctor.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(PairingCodeResponse {
            qr_text: code.code.clone(),
            code: code.code,
            expires_at: code.expires_at,
        }),
    ))
}

// ── POST /links/pairing-code/redeem ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct RedeemRequest {
    #[serde(default)]
    pub code: String,
}

pub async fn redeem_pairing_code(
    CurrentPatient(patient): CurrentPatient,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RedeemRequest>,
) -> Result<Json<LinkWithPatient>, ApiError> {
    let usecase = RedeemPairingCodeUseCase {
        repo: state.pairing_code_repo(),
    };
    let redemption = usecase.execute(patient.id, &body.code).await?;
    Ok(Json(LinkWithPatient::new(redemption.link, patient)))
}
