//! Validated authentication settings.

use std::fmt;

use axum_extra::extract::cookie::SameSite;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::password::PasswordHasher;

/// Minimum length of the session signing secret in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Default session cookie name.
pub const DEFAULT_COOKIE_NAME: &str = "eloquia_session";

/// Default session lifetime in seconds (24 hours).
pub const DEFAULT_SESSION_TTL_SECS: i64 = 86_400;

/// Errors raised while validating auth settings at startup.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("session secret must be at least {} bytes", MIN_SECRET_LEN)]
    SecretTooShort,
    #[error("invalid SameSite value: {0}")]
    InvalidSameSite(String),
    #[error("session ttl must be positive")]
    NonPositiveTtl,
    #[error("password cost must be at least {min}, got {got}")]
    PasswordCostTooLow { min: u32, got: u32 },
    #[error("password memory must be at least {min} KiB, got {got}")]
    PasswordMemoryTooLow { min: u32, got: u32 },
    #[error("invalid password hashing parameters: {0}")]
    PasswordParams(String),
}

/// HMAC key used to sign session claims. `Debug` never prints the bytes.
#[derive(Clone)]
pub struct SessionSecret(Vec<u8>);

impl SessionSecret {
    /// Accept a standard base64 string that decodes to at least
    /// [`MIN_SECRET_LEN`] bytes, otherwise use the raw bytes of the value.
    pub fn parse(raw: &str) -> Result<Self, SettingsError> {
        let raw = raw.trim();
        if let Ok(decoded) = STANDARD.decode(raw) {
            if decoded.len() >= MIN_SECRET_LEN {
                return Ok(Self(decoded));
            }
        }
        if raw.len() >= MIN_SECRET_LEN {
            return Ok(Self(raw.as_bytes().to_vec()));
        }
        Err(SettingsError::SecretTooShort)
    }

    /// Random per-process secret. Sessions do not survive a restart.
    pub fn ephemeral() -> Self {
        let bytes: [u8; MIN_SECRET_LEN] = rand::random();
        Self(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(..)")
    }
}

/// Case-insensitive `Lax` / `Strict` / `None`.
pub fn parse_same_site(raw: &str) -> Result<SameSite, SettingsError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" => Ok(SameSite::None),
        _ => Err(SettingsError::InvalidSameSite(raw.to_owned())),
    }
}

/// Attributes applied to the session cookie.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub domain: Option<String>,
    pub path: String,
    pub secure: bool,
    pub same_site: SameSite,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_COOKIE_NAME.to_owned(),
            domain: None,
            path: "/".to_owned(),
            secure: false,
            same_site: SameSite::Lax,
        }
    }
}

/// Everything the session layer needs, validated once at startup.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub secret: SessionSecret,
    pub cookie: CookieSettings,
    pub session_ttl: chrono::Duration,
    pub passwords: PasswordHasher,
}

impl AuthSettings {
    pub fn new(
        secret: SessionSecret,
        cookie: CookieSettings,
        session_ttl_secs: i64,
        passwords: PasswordHasher,
    ) -> Result<Self, SettingsError> {
        if session_ttl_secs <= 0 {
            return Err(SettingsError::NonPositiveTtl);
        }
        Ok(Self {
            secret,
            cookie,
            session_ttl: chrono::Duration::seconds(session_ttl_secs),
            passwords,
        })
    }
}
