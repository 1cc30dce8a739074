use anyhow::{Context, Result};
use serde_json::Value;

use crate::gateway::ApiGateway;

use super::normalize;

pub struct PaymentService {
    gateway: ApiGateway,
}

impl PaymentService {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<Value>> {
        let val = self.gateway.get("/payments").await.context("failed to load payments")?;
        Ok(normalize::coerce_list(val))
    }

    pub async fn submit(&self, payment: &Value) -> Result<Value> {
        let val = self.gateway.post("/payments", payment).await.context("failed to submit payment")?;
        Ok(normalize::coerce_object(val))
    }
}
