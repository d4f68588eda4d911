//! Session extractors for doctor and patient routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;

use eloquia_auth_types::session::SessionError;
use eloquia_domain::session::Subject;

use crate::domain::repository::{DoctorRepository, PatientRepository};
use crate::domain::types::{Doctor, Patient};
use crate::error::ApiError;
use crate::state::AppState;

/// The doctor owning the request's session.
///
/// Rejects with 401 when the cookie is missing or belongs to a patient. An
/// invalid or expired session, or a doctor that no longer exists, also
/// clears the cookie.
#[derive(Debug, Clone)]
pub struct CurrentDoctor(pub Doctor);

/// The patient owning the request's session. Same rejection rules as
/// [`CurrentDoctor`].
#[derive(Debug, Clone)]
pub struct CurrentPatient(pub Patient);

fn unauthorized_and_clear(state: &AppState) -> Response {
    (state.sessions.clear(CookieJar::new()), ApiError::Unauthorized).into_response()
}

/// Decode the session cookie into its subject.
fn read_subject(state: &AppState, jar: &CookieJar) -> Result<Subject, Response> {
    match state.sessions.read(jar) {
        Ok(session) => Ok(session.subject),
        Err(SessionError::Missing) => Err(ApiError::Unauthorized.into_response()),
        Err(e) => {
            tracing::debug!(error = %e, "rejected session cookie");
            Err(unauthorized_and_clear(state))
        }
    }
}

impl FromRequestParts<AppState> for CurrentDoctor {
    type Rejection = Response;

    // Extract synchronously and return a 'static future; see axum-core's
    // `fn -> impl Future + Send` signature.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let jar = CookieJar::from_headers(&parts.headers);
        let state = state.clone();

        async move {
            let Subject::Doctor(id) = read_subject(&state, &jar)? else {
                return Err(ApiError::Unauthorized.into_response());
            };
            match state.doctor_repo().find_by_id(id).await {
                Ok(Some(doctor)) => Ok(Self(doctor)),
                Ok(None) => Err(unauthorized_and_clear(&state)),
                Err(e) => Err(e.into_response()),
            }
        }
    }
}

impl FromRequestParts<AppState> for CurrentPatient {
    type Rejection = Response;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let jar = CookieJar::from_headers(&parts.headers);
        let state = state.clone();

        async move {
            let Subject::Patient(id) = read_subject(&state, &jar)? else {
                return Err(ApiError::Unauthorized.into_response());
            };
            match state.patient_repo().find_by_id(id).await {
                Ok(Some(patient)) => Ok(Self(patient)),
                Ok(None) => Err(unauthorized_and_clear(&state)),
                Err(e) => Err(e.into_response()),
            }
        }
    }
}
