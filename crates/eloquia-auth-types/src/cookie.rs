//! Session cookie builders.
//!
//! Attributes come from [`CookieSettings`]; the cookie is always `HttpOnly`.

use axum_extra::extract::cookie::{Cookie, CookieJar};
use time::Duration;

use crate::settings::CookieSettings;

fn build(settings: &CookieSettings, value: String, max_age: Duration) -> Cookie<'static> {
    let mut builder = Cookie::build((settings.name.clone(), value))
        .path(settings.path.clone())
        .max_age(max_age)
        .http_only(true)
        .secure(settings.secure)
        .same_site(settings.same_site);
    if let Some(domain) = &settings.domain {
        builder = builder.domain(domain.clone());
    }
    builder.build()
}

/// Set the session cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::{CookieJar, SameSite};
/// use eloquia_auth_types::cookie::set_session_cookie;
/// use eloquia_auth_types::settings::CookieSettings;
///
/// let settings = CookieSettings {
///     domain: Some("example.com".to_string()),
///     secure: true,
///     ..CookieSettings::default()
/// };
/// let jar = set_session_cookie(CookieJar::new(), &settings, "token".to_string(), 86400);
/// let cookie = jar.get("eloquia_session").unwrap();
/// assert_eq!(cookie.value(), "token");
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(86400)));
/// assert_eq!(cookie.same_site(), Some(SameSite::Lax));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(
    jar: CookieJar,
    settings: &CookieSettings,
    value: String,
    max_age_secs: i64,
) -> CookieJar {
    jar.add(build(settings, value, Duration::seconds(max_age_secs)))
}

/// Expire the session cookie by re-sending it empty with Max-Age 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use eloquia_auth_types::cookie::{clear_session_cookie, set_session_cookie};
/// use eloquia_auth_types::settings::CookieSettings;
///
/// let settings = CookieSettings::default();
/// let jar = set_session_cookie(CookieJar::new(), &settings, "token".to_string(), 60);
/// let jar = clear_session_cookie(jar, &settings);
/// let cookie = jar.get("eloquia_session").unwrap();
/// assert_eq!(cookie.value(), "");
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookie(jar: CookieJar, settings: &CookieSettings) -> CookieJar {
    jar.add(build(settings, String::new(), Duration::ZERO))
}

/// Read the raw session token, treating an empty value as absent.
pub fn session_token<'a>(jar: &'a CookieJar, settings: &CookieSettings) -> Option<&'a str> {
    jar.get(&settings.name)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
}
