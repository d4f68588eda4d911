//! Session helpers for integration tests.
//!
//! `TestAuth` holds auth settings with a fixed secret and cheap password
//! hashing, so tests can build an app state and forge session cookies that
//! the app will accept.

use axum_extra::extract::cookie::Cookie;
use chrono::{Duration, Utc};
use eloquia_auth_types::password::{MIN_PASSWORD_COST, MIN_PASSWORD_MEMORY_KIB, PasswordHasher};
use eloquia_auth_types::session::SessionCodec;
use eloquia_auth_types::settings::{AuthSettings, CookieSettings, SessionSecret};
use eloquia_domain::session::Subject;

/// Fixed signing secret shared by every test app.
pub const TEST_SECRET: &str = "eloquia-test-secret-0123456789abcdef";

pub struct TestAuth {
    pub settings: AuthSettings,
}

impl TestAuth {
    pub fn new() -> Self {
        let secret = SessionSecret::parse(TEST_SECRET).expect("valid test secret");
        let passwords = PasswordHasher::new(MIN_PASSWORD_COST, MIN_PASSWORD_MEMORY_KIB)
            .expect("valid test password params");
        let settings = AuthSettings::new(secret, CookieSettings::default(), 3600, passwords)
            .expect("valid test auth settings");
        Self { settings }
    }

    fn codec(&self) -> SessionCodec {
        SessionCodec::new(&self.settings.secret, self.settings.session_ttl)
    }

    /// Session cookie the app will accept for `subject`.
    pub fn cookie(&self, subject: Subject) -> Cookie<'static> {
        let (token, _) = self
            .codec()
            .issue(subject, Utc::now())
            .expect("issue test session");
        Cookie::new(self.settings.cookie.name.clone(), token)
    }

    /// Correctly signed cookie whose session expired an hour ago.
    pub fn expired_cookie(&self, subject: Subject) -> Cookie<'static> {
        let issued = Utc::now() - self.settings.session_ttl - Duration::hours(1);
        let (token, _) = self
            .codec()
            .issue(subject, issued)
            .expect("issue expired test session");
        Cookie::new(self.settings.cookie.name.clone(), token)
    }

    /// Cookie signed with a different secret.
    pub fn forged_cookie(&self, subject: Subject) -> Cookie<'static> {
        let codec = SessionCodec::new(&SessionSecret::ephemeral(), self.settings.session_ttl);
        let (token, _) = codec
            .issue(subject, Utc::now())
            .expect("issue forged test session");
        Cookie::new(self.settings.cookie.name.clone(), token)
    }
}

impl Default for TestAuth {
    fn default() -> Self {
        Self::new()
    }
}
