use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use eloquia_domain::session::Subject;

use crate::auth::CurrentPatient;
use crate::error::ApiError;
use crate::handlers::doctor::{LoginRequest, LogoutResponse, RegisterRequest};
use crate::handlers::dto::PatientAccountDto;
use crate::handlers::json::ApiJson;
use crate::state::AppState;
use crate::usecase::account::{
    GetMyDoctorUseCase, LoginPatientUseCase, RegisterPatientUseCase,
};

#[derive(Serialize)]
pub struct PatientResponse {
    pub patient: PatientAccountDto,
}

// ── POST /patient/register ───────────────────────────────────────────────────

pub async fn register_patient(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = RegisterPatientUseCase {
        patients: state.patient_repo(),
        passwords: state.passwords.clone(),
    };
    let patient = usecase.execute(body.into()).await?;
    let jar = state.sessions.issue(jar, Subject::Patient(patient.id))?;
    Ok((
        StatusCode::CREATED,
        jar,
        Json(PatientResponse {
            patient: patient.into(),
        }),
    ))
}

// ── POST /patient/login ──────────────────────────────────────────────────────

pub async fn login_patient(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = LoginPatientUseCase {
        patients: state.patient_repo(),
        passwords: state.passwords.clone(),
    };
    let patient = usecase.execute(body.into()).await?;
    let jar = state.sessions.issue(jar, Subject::Patient(patient.id))?;
    Ok((
        jar,
        Json(PatientResponse {
            patient: patient.into(),
        }),
    ))
}

// ── GET /patient/me ──────────────────────────────────────────────────────────

pub async fn get_patient_me(CurrentPatient(patient): CurrentPatient) -> Json<PatientResponse> {
    Json(PatientResponse {
        patient: patient.into(),
    })
}

// ── GET /patient/mydoctor ────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyDoctorPractice {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyDoctorDto {
    pub email: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_doctor_practice: Option<MyDoctorPractice>,
}

#[derive(Serialize)]
pub struct MyDoctorResponse {
    pub doctor: MyDoctorDto,
}

pub async fn get_my_doctor(
    CurrentPatient(patient): CurrentPatient,
    State(state): State<AppState>,
) -> Result<Json<MyDoctorResponse>, ApiError> {
    let usecase = GetMyDoctorUseCase {
        links: state.link_repo(),
        doctors: state.doctor_repo(),
        practices: state.practice_repo(),
    };
    let my_doctor = usecase.execute(patient.id).await?;
    Ok(Json(MyDoctorResponse {
        doctor: MyDoctorDto {
            email: my_doctor.doctor.email,
            display_name: my_doctor.doctor.display_name,
            my_doctor_practice: my_doctor.practice.map(|practice| MyDoctorPractice {
                name: practice.name,
                address: practice.address,
            }),
        },
    }))
}

// ── POST /patient/logout ─────────────────────────────────────────────────────

pub async fn logout_patient(
    _patient: CurrentPatient,
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
