use serde::Deserialize;

use eloquia_auth_types::password::PasswordHasher;
use eloquia_auth_types::settings::{
    AuthSettings, CookieSettings, DEFAULT_COOKIE_NAME, DEFAULT_SESSION_TTL_SECS, SessionSecret,
    SettingsError, parse_same_site,
};
use eloquia_core::config::Config;

fn default_port() -> u16 {
    8080
}

fn default_cookie_name() -> String {
    DEFAULT_COOKIE_NAME.to_owned()
}

fn default_cookie_path() -> String {
    "/".to_owned()
}

fn default_same_site() -> String {
    "Lax".to_owned()
}

fn default_session_ttl_secs() -> i64 {
    DEFAULT_SESSION_TTL_SECS
}

fn default_password_cost() -> u32 {
    3
}

fn default_password_memory_kib() -> u32 {
    19_456
}

fn default_shutdown_grace_secs() -> u64 {
    5
}

/// API service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Store connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 8080). Env var: `PORT`.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Deployment environment. `APP_ENV` is read when `ENVIRONMENT` is unset.
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub app_env: Option<String>,
    /// Run pending migrations before serving.
    #[serde(default)]
    pub apply_migrations: bool,
    /// Session signing secret, base64 or raw, at least 32 bytes.
    #[serde(default)]
    pub auth_cookie_secret: Option<String>,
    #[serde(default = "default_cookie_name")]
    pub auth_cookie_name: String,
    #[serde(default)]
    pub auth_cookie_domain: Option<String>,
    #[serde(default = "default_cookie_path")]
    pub auth_cookie_path: String,
    /// Defaults to on in production.
    #[serde(default)]
    pub auth_cookie_secure: Option<bool>,
    #[serde(default = "default_same_site")]
    pub auth_cookie_samesite: String,
    #[serde(default = "default_session_ttl_secs")]
    pub auth_session_ttl_secs: i64,
    /// Argon2 iterations.
    #[serde(default = "default_password_cost")]
    pub auth_password_cost: u32,
    /// Argon2 memory in KiB.
    #[serde(default = "default_password_memory_kib")]
    pub auth_password_memory_kib: u32,
    /// Seconds in-flight requests get after a shutdown signal.
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
}

impl Config for ApiConfig {}

impl ApiConfig {
    pub fn environment(&self) -> &str {
        self.environment
            .as_deref()
            .or(self.app_env.as_deref())
            .map(str::trim)
            .filter(|env| !env.is_empty())
            .unwrap_or("development")
    }

    pub fn is_production(&self) -> bool {
        self.environment().eq_ignore_ascii_case("production")
    }

    pub fn has_cookie_secret(&self) -> bool {
        self.auth_cookie_secret
            .as_deref()
            .is_some_and(|secret| !secret.trim().is_empty())
    }

    /// Validate and assemble the session settings. Without a configured
    /// secret an ephemeral one is generated.
    pub fn auth_settings(&self) -> Result<AuthSettings, SettingsError> {
        let secret = match self.auth_cookie_secret.as_deref() {
            Some(raw) if !raw.trim().is_empty() => SessionSecret::parse(raw)?,
            _ => SessionSecret::ephemeral(),
        };
        let cookie = CookieSettings {
            name: self.auth_cookie_name.trim().to_owned(),
            domain: self
                .auth_cookie_domain
                .as_deref()
                .map(str::trim)
                .filter(|domain| !domain.is_empty())
                .map(str::to_owned),
            path: self.auth_cookie_path.trim().to_owned(),
            secure: self.auth_cookie_secure.unwrap_or_else(|| self.is_production()),
            same_site: parse_same_site(&self.auth_cookie_samesite)?,
        };
        let passwords =
            PasswordHasher::new(self.auth_password_cost, self.auth_password_memory_kib)?;
        AuthSettings::new(secret, cookie, self.auth_session_ttl_secs, passwords)
    }
}
