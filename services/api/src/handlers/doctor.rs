use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use eloquia_domain::session::Subject;

use crate::auth::CurrentDoctor;
use crate::error::ApiError;
use crate::handlers::dto::DoctorDto;
use crate::handlers::json::ApiJson;
use crate::state::AppState;
use crate::usecase::account::{
    LoginDoctorUseCase, LoginInput, RegisterDoctorUseCase, RegisterInput,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub password: String,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(body: RegisterRequest) -> Self {
        Self {
            email: body.email,
            display_name: body.display_name,
            password: body.password,
        }
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl From<LoginRequest> for LoginInput {
    fn from(body: LoginRequest) -> Self {
        Self {
            email: body.email,
            password: body.password,
        }
    }
}

#[derive(Serialize)]
pub struct DoctorResponse {
    pub doctor: DoctorDto,
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub status: &'static str,
}

// ── POST /doctor/register ────────────────────────────────────────────────────

pub async fn register_doctor(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = RegisterDoctorUseCase {
        doctors: state.doctor_repo(),
        passwords: state.passwords.clone(),
    };
    let doctor = usecase.execute(body.into()).await?;
    let jar = state.sessions.issue(jar, Subject::Doctor(doctor.id))?;
    Ok((
        StatusCode::CREATED,
        jar,
        Json(DoctorResponse {
            doctor: doctor.into(),
        }),
    ))
}

// ── POST /doctor/login ───────────────────────────────────────────────────────

pub async fn login_doctor(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = LoginDoctorUseCase {
        doctors: state.doctor_repo(),
        passwords: state.passwords.clone(),
    };
    let doctor = usecase.execute(body.into()).await?;
    let jar = state.sessions.issue(jar, Subject::Doctor(doctor.id))?;
    Ok((
        jar,
        Json(DoctorResponse {
            doctor: doctor.into(),
        }),
    ))
}

// ── GET /doctor/me ───────────────────────────────────────────────────────────

pub async fn get_doctor_me(CurrentDoctor(doctor): CurrentDoctor) -> Json<DoctorResponse> {
    Json(DoctorResponse {
        doctor: doctor.into(),
    })
}

// ── POST /doctor/logout ──────────────────────────────────────────────────────

pub async fn logout_doctor(
    _doctor: CurrentDoctor,
    State(state): State<AppState>,
    jar: CookieJar,
) -> impl IntoResponse {
    (
        state.sessions.clear(jar),
        Json(LogoutResponse {
            status: "logged out",
        }),
    )
}
