use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use eloquia_auth_types::password::PasswordError;
use eloquia_auth_types::session::SessionError;

/// API service error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("unauthorized")]
    Unauthorized,
    #[error("no approved link for patient")]
    NoApprovedLink,
    #[error("entry does not belong to patient")]
    EntryNotOwned,
    #[error("patient not found")]
    PatientNotFound,
    #[error("link not found")]
    LinkNotFound,
    #[error("no doctor assigned")]
    NoDoctorAssigned,
    #[error("code not found or expired")]
    PairingCodeNotFound,
    #[error("an account with that email already exists")]
    AccountExists,
    #[error("link already exists")]
    LinkExists,
    #[error("could not generate code")]
    PairingCodeUnavailable,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NoApprovedLink => "NO_APPROVED_LINK",
            Self::EntryNotOwned => "ENTRY_NOT_OWNED",
            Self::PatientNotFound => "PATIENT_NOT_FOUND",
            Self::LinkNotFound => "LINK_NOT_FOUND",
            Self::NoDoctorAssigned => "NO_DOCTOR_ASSIGNED",
            Self::PairingCodeNotFound => "PAIRING_CODE_NOT_FOUND",
            Self::AccountExists => "ACCOUNT_EXISTS",
            Self::LinkExists => "LINK_EXISTS",
            Self::PairingCodeUnavailable => "PAIRING_CODE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NoApprovedLink | Self::EntryNotOwned => StatusCode::FORBIDDEN,
            Self::PatientNotFound
            | Self::LinkNotFound
            | Self::NoDoctorAssigned
            | Self::PairingCodeNotFound => StatusCode::NOT_FOUND,
            Self::AccountExists | Self::LinkExists => StatusCode::CONFLICT,
            Self::PairingCodeUnavailable | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::TooShort => Self::Validation(err.to_string()),
            PasswordError::Hash(_) => Self::Internal(anyhow::Error::new(err)),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Encode(_) => Self::Internal(anyhow::Error::new(err)),
            _ => Self::Unauthorized,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(_: JsonRejection) -> Self {
        Self::validation("invalid JSON payload")
    }
}

impl From<QueryRejection> for ApiError {
    fn from(_: QueryRejection) -> Self {
        Self::validation("invalid query parameters")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
            }
            Self::PairingCodeUnavailable => {
                tracing::error!(kind = "PAIRING_CODE_UNAVAILABLE", "pairing code space exhausted");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
