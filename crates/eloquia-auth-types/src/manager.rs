//! Cookie-backed session issue / read / clear.

use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;

use eloquia_domain::session::Subject;

use crate::cookie::{clear_session_cookie, session_token, set_session_cookie};
use crate::session::{Session, SessionCodec, SessionError};
use crate::settings::{AuthSettings, CookieSettings};

#[derive(Clone)]
pub struct SessionManager {
    codec: SessionCodec,
    cookie: CookieSettings,
}

impl SessionManager {
    pub fn new(settings: &AuthSettings) -> Self {
        Self {
            codec: SessionCodec::new(&settings.secret, settings.session_ttl),
            cookie: settings.cookie.clone(),
        }
    }

    pub fn cookie_settings(&self) -> &CookieSettings {
        &self.cookie
    }

    /// Sign a fresh session for `subject` and attach it to the jar.
    pub fn issue(&self, jar: CookieJar, subject: Subject) -> Result<CookieJar, SessionError> {
        let (token, _) = self.codec.issue(subject, Utc::now())?;
        Ok(set_session_cookie(
            jar,
            &self.cookie,
            token,
            self.codec.ttl().num_seconds(),
        ))
    }

    /// Read and verify the session carried by the jar.
    pub fn read(&self, jar: &CookieJar) -> Result<Session, SessionError> {
        let token = session_token(jar, &self.cookie).ok_or(SessionError::Missing)?;
        self.codec.decode(token)
    }

    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        clear_session_cookie(jar, &self.cookie)
    }
}
