//! Route guard predicate: gates non-public paths on presence of the mirror
//! cookie. Presence only — token integrity, expiry, and role-to-route
//! matching are deliberately not checked at this layer.

use crate::config::AUTH_COOKIE;
use crate::session::parse_cookie;

/// Paths served without any session cookie (home, auth pages, diagnostics).
pub const PUBLIC_PATHS: &[&str] = &["/", "/login", "/register", "/forgot-password", "/login-debug"];

/// Where gated requests are sent, with the marker param showing a redirect happened.
pub const LOGIN_REDIRECT: &str = "/login?redirected=true";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    RedirectToLogin,
}

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Paths the guard never applies to: API routes and static/build assets.
pub fn is_exempt_path(path: &str) -> bool {
    path.starts_with("/api/")
        || path.starts_with("/assets/")
        || path == "/favicon.ico"
        || path == "/healthz"
}

/// Total decision over (path, cookie presence).
pub fn evaluate(path: &str, has_auth_cookie: bool) -> GuardDecision {
    if is_exempt_path(path) || is_public_path(path) {
        return GuardDecision::Proceed;
    }
    if has_auth_cookie {
        GuardDecision::Proceed
    } else {
        GuardDecision::RedirectToLogin
    }
}

/// Decision straight from a request's Cookie header, if any.
pub fn evaluate_request(path: &str, cookie_header: Option<&str>) -> GuardDecision {
    let present = cookie_header
        .map(|h| parse_cookie(h, AUTH_COOKIE).is_some())
        .unwrap_or(false);
    evaluate(path, present)
}
