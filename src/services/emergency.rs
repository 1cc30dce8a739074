use anyhow::{Context, Result};
use serde_json::Value;

use crate::gateway::ApiGateway;

use super::normalize;

/// Emergency-services dashboard data (ambulances, ER capacity).
pub struct EmergencyService {
    gateway: ApiGateway,
}

impl EmergencyService {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn resources(&self) -> Result<Vec<Value>> {
        let val = self
            .gateway
            .get("/emergency/resources")
            .await
            .context("failed to load emergency resources")?;
        Ok(normalize::coerce_list(val))
    }
}
