//! Authentication service: login, registration, logout, and profile-picture
//! refresh, wired to the session store so persistence happens in one place.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::gateway::ApiGateway;
use crate::session::{Role, SessionStore, UserIdentity};

use super::normalize;

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: UserIdentity,
    pub token: String,
    /// Set-Cookie value for the mirror cookie; the host environment applies it.
    pub mirror_cookie: String,
    /// Dashboard the role lands on.
    pub dashboard: &'static str,
}

pub struct AuthService {
    gateway: ApiGateway,
    store: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(gateway: ApiGateway, store: Arc<SessionStore>) -> Self {
        Self { gateway, store }
    }

    /// POST /auth/login, then persist {token, user} atomically in the store.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        let val = self
            .gateway
            .post("/auth/login", &json!({ "email": email, "password": password }))
            .await
            .context("login request failed")?;
        let body = normalize::coerce_object(val);
        let token = body
            .get("token")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow!("login response missing token"))?
            .to_string();
        let user_val = body
            .get("user")
            .cloned()
            .ok_or_else(|| anyhow!("login response missing user"))?;
        let user: UserIdentity =
            serde_json::from_value(user_val).context("login response user payload")?;
        let mirror_cookie = self.store.save(&token, &user);
        info!(target: "auth", "login user={} role={}", user.id, user.role.tag());
        let dashboard = user.role.dashboard_path();
        Ok(LoginOutcome { user, token, mirror_cookie, dashboard })
    }

    /// POST /auth/register. Registration does not authenticate; the caller
    /// follows up with `login`.
    pub async fn register(&self, req: &RegisterRequest) -> Result<UserIdentity> {
        let val = self
            .gateway
            .post("/auth/register", req)
            .await
            .context("registration request failed")?;
        let body = normalize::coerce_object(val);
        let user_val = body.get("user").cloned().unwrap_or(body);
        let user: UserIdentity =
            serde_json::from_value(user_val).context("registration response user payload")?;
        info!(target: "auth", "registered user={} role={}", user.id, user.role.tag());
        Ok(user)
    }

    /// Re-fetch the profile and fold a fresh picture URL into the stored
    /// session. No-op when logged out or when the profile carries no picture.
    pub async fn refresh_profile_picture(&self) -> Result<Option<String>> {
        let state = self.store.load();
        let (Some(token), Some(user)) = (state.token, state.user) else {
            return Ok(None);
        };
        let val = self
            .gateway
            .get("/users/profile")
            .await
            .context("profile refresh request failed")?;
        let profile = normalize::coerce_object(val);
        let url = profile
            .get("profile_picture")
            .or_else(|| profile.get("profilePicture"))
            .and_then(|v| v.as_str())
            .map(str::to_string);
        if let Some(u) = &url {
            let enriched = user.with_profile_picture(u.clone());
            self.store.save(&token, &enriched);
        }
        Ok(url)
    }

    /// Upload a new profile picture as multipart form data, then refresh the
    /// stored session with whatever URL the backend assigned.
    pub async fn upload_profile_picture(&self, filename: &str, bytes: Vec<u8>) -> Result<Option<String>> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("picture", part);
        let val = self
            .gateway
            .post_form("/users/profile/picture", form)
            .await
            .context("profile picture upload failed")?;
        let body = normalize::coerce_object(val);
        let url = body
            .get("url")
            .or_else(|| body.get("profile_picture"))
            .and_then(|v| v.as_str())
            .map(str::to_string);
        if let Some(u) = &url {
            let state = self.store.load();
            if let (Some(token), Some(user)) = (state.token, state.user) {
                self.store.save(&token, &user.with_profile_picture(u.clone()));
            }
        }
        Ok(url)
    }

    /// Forget the session locally. Returns the expired mirror cookie for the
    /// host environment to apply.
    pub fn logout(&self) -> String {
        info!(target: "auth", "logout");
        self.store.clear()
    }
}
