use anyhow::{Context, Result};
use serde_json::Value;

use crate::gateway::ApiGateway;

use super::normalize;

/// Profile and user-administration endpoints.
pub struct UserService {
    gateway: ApiGateway,
}

impl UserService {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn profile(&self) -> Result<Value> {
        let val = self.gateway.get("/users/profile").await.context("failed to load profile")?;
        Ok(normalize::coerce_object(val))
    }

    pub async fn update_profile(&self, changes: &Value) -> Result<Value> {
        let val = self
            .gateway
            .put("/users/profile", changes)
            .await
            .context("failed to update profile")?;
        Ok(normalize::coerce_object(val))
    }

    /// Admin surface: all users, optionally filtered by role tag.
    pub async fn list(&self, role: Option<&str>) -> Result<Vec<Value>> {
        let val = match role {
            Some(r) => self.gateway.get_with_query("/users", &[("role", r)]).await,
            None => self.gateway.get("/users").await,
        }
        .context("failed to list users")?;
        Ok(normalize::coerce_list(val))
    }

    pub async fn create(&self, user: &Value) -> Result<Value> {
        let val = self.gateway.post("/users", user).await.context("failed to create user")?;
        Ok(normalize::coerce_object(val))
    }

    pub async fn remove(&self, id: &str) -> Result<()> {
        self.gateway
            .delete(&format!("/users/{}", id))
            .await
            .context("failed to delete user")?;
        Ok(())
    }
}
