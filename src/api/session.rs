//! Session cookie handling
//!
//! The session token travels in an HttpOnly cookie named `token`. Attach and
//! detach use the same attribute set, so the detach cookie replaces the live
//! one instead of coexisting with it.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::{Duration, OffsetDateTime};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "token";

/// Build the cookie carrying a freshly issued session token
pub fn session_cookie(token: String, expiration_hours: u64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::None)
        .secure(secure)
        .max_age(Duration::hours(expiration_hours as i64))
        .build()
}

/// Build the detach cookie: empty value, expiry in the past
pub fn expired_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::None)
        .secure(secure)
        .max_age(Duration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}

/// Read the session token from a request's cookie jar.
///
/// An absent cookie is a normal outcome, not an error.
pub fn token_from_jar(jar: &CookieJar) -> Option<&str> {
    jar.get(SESSION_COOKIE).map(|cookie| cookie.value())
}
