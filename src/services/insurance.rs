use anyhow::{Context, Result};
use serde_json::Value;

use crate::gateway::ApiGateway;

use super::normalize;

pub struct InsuranceService {
    gateway: ApiGateway,
}

impl InsuranceService {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn plans(&self) -> Result<Vec<Value>> {
        let val = self.gateway.get("/insurance/plans").await.context("failed to load insurance plans")?;
        Ok(normalize::coerce_list(val))
    }

    pub async fn submit_claim(&self, claim: &Value) -> Result<Value> {
        let val = self
            .gateway
            .post("/insurance/claims", claim)
            .await
            .context("failed to submit insurance claim")?;
        Ok(normalize::coerce_object(val))
    }
}
