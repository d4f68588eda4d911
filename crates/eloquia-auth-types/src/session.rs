//! Signed session claims.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eloquia_domain::session::Subject;

use crate::settings::SessionSecret;

/// Errors returned when issuing or reading a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no session")]
    Missing,
    #[error("session expired")]
    Expired,
    #[error("invalid session")]
    Invalid,
    #[error("session must name exactly one subject")]
    AmbiguousSubject,
    #[error("session encoding failed: {0}")]
    Encode(String),
}

/// Wire payload of the session token.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `doctor_id` | doctor subject, absent for patient sessions |
/// | `patient_id` | patient subject, absent for doctor sessions |
/// | `iat` | issued at, seconds since epoch |
/// | `exp` | expires at, seconds since epoch |
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    doctor_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    patient_id: Option<Uuid>,
    iat: i64,
    exp: i64,
}

/// A verified session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub subject: Subject,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies session tokens (HS256, zero leeway).
#[derive(Clone)]
pub struct SessionCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: chrono::Duration,
}

impl SessionCodec {
    pub fn new(secret: &SessionSecret, ttl: chrono::Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    /// Issue a session for `subject` valid from `now` for the configured ttl.
    /// Timestamps are truncated to whole seconds.
    pub fn issue(&self, subject: Subject, now: DateTime<Utc>) -> Result<(String, Session), SessionError> {
        let iat = now.timestamp();
        let exp = iat + self.ttl.num_seconds();
        let claims = SessionClaims {
            doctor_id: subject.doctor_id(),
            patient_id: subject.patient_id(),
            iat,
            exp,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| SessionError::Encode(e.to_string()))?;
        let session = Session {
            subject,
            issued_at: from_timestamp(iat)?,
            expires_at: from_timestamp(exp)?,
        };
        Ok((token, session))
    }

    /// Verify signature and expiry, then require exactly one subject.
    pub fn decode(&self, token: &str) -> Result<Session, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<SessionClaims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => SessionError::Invalid,
            }
        })?;
        let claims = data.claims;

        let subject = match (claims.doctor_id, claims.patient_id) {
            (Some(id), None) => Subject::Doctor(id),
            (None, Some(id)) => Subject::Patient(id),
            _ => return Err(SessionError::AmbiguousSubject),
        };
        let expires_at = from_timestamp(claims.exp)?;
        if expires_at <= Utc::now() {
            return Err(SessionError::Expired);
        }

        Ok(Session {
            subject,
            issued_at: from_timestamp(claims.iat)?,
            expires_at,
        })
    }
}

fn from_timestamp(secs: i64) -> Result<DateTime<Utc>, SessionError> {
    DateTime::from_timestamp(secs, 0).ok_or(SessionError::Invalid)
}
