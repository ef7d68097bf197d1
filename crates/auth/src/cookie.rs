//! Session cookie construction

use axum_extra::extract::cookie::{Cookie, SameSite};
use curio_common::RuntimeMode;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE_NAME: &str = "artifactToken";

/// HTTP-only cookie carrying `token`.
///
/// Development keeps the cookie same-site; production sends it cross-site,
/// which browsers only accept when it is also `Secure`.
pub(crate) fn session_cookie(token: String, mode: RuntimeMode) -> Cookie<'static> {
    let (secure, same_site) = match mode {
        RuntimeMode::Production => (true, SameSite::None),
        RuntimeMode::Development => (false, SameSite::Strict),
    };

    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(same_site)
        .build()
}

/// Cookie that, once added to a jar, instructs the browser to drop the session
pub(crate) fn removal_cookie(mode: RuntimeMode) -> Cookie<'static> {
    let mut cookie = session_cookie(String::new(), mode);
    cookie.make_removal();
    cookie
}
