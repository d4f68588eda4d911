use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentDoctor;
use crate::error::ApiError;
use crate::handlers::dto::{DoctorDto, PracticeDto};
use crate::handlers::json::ApiJson;
use crate::state::AppState;
use crate::usecase::practice::{CreatePracticeInput, CreatePracticeUseCase};

// ── POST /practice ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePracticeRequest {
    #[serde(default)]
    pub name: String,
    pub address: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Serialize)]
pub struct CreatePracticeResponse {
    pub practice: PracticeDto,
    pub doctor: DoctorDto,
}

pub async fn create_practice(
    CurrentDoctor(doctor): CurrentDoctor,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreatePracticeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = CreatePracticeUseCase {
        repo: state.practice_repo(),
    };
    let (practice, doctor) = usecase
        .execute(
            doctor.id,
            CreatePracticeInput {
                name: body.name,
                address: body.address,
                logo_url: body.logo_url,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatePracticeResponse {
            practice: practice.into(),
            doctor: doctor.into(),
        }),
    ))
}
