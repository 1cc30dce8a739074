//!
//! carelink edge gate
//! ------------------
//! Axum front layer applying the route guard to every request before the
//! portal shell is served. The guard is a cookie-presence check only; see
//! `guard` for the exact contract.

use std::net::SocketAddr;

use anyhow::Context;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use tracing::info;

use crate::guard::{self, GuardDecision};

/// Middleware form of the guard: gated paths with no auth cookie are sent to
/// the login page with the redirect marker set.
pub async fn require_session_cookie(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let cookie_header = req
        .headers()
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    match guard::evaluate_request(&path, cookie_header.as_deref()) {
        GuardDecision::Proceed => next.run(req).await,
        GuardDecision::RedirectToLogin => {
            info!(target: "edge", "gated '{}' without auth cookie, redirecting to login", path);
            Redirect::temporary(guard::LOGIN_REDIRECT).into_response()
        }
    }
}

/// Wrap a shell router with the guard and a health endpoint.
pub fn guarded_router(shell: Router) -> Router {
    shell
        .route("/healthz", get(|| async { "ok" }))
        .layer(middleware::from_fn(require_session_cookie))
}

/// Minimal placeholder shell: real deployments put the portal app here.
pub fn placeholder_shell() -> Router {
    Router::new()
        .route("/", get(|| async { "carelink portal" }))
        .route("/login", get(|| async { "carelink login" }))
        .fallback(|| async { "carelink shell" })
}

pub async fn run_with_port(port: u16, shell: Router) -> anyhow::Result<()> {
    let app = guarded_router(shell);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding edge gate to {}", addr))?;
    info!(target: "edge", "carelink edge gate listening on {}", addr);
    axum::serve(listener, app).await.context("edge gate server")?;
    Ok(())
}
