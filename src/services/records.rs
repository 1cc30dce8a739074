use anyhow::{Context, Result};
use serde_json::Value;

use crate::gateway::ApiGateway;

use super::normalize;

/// Medical records access for providers.
pub struct RecordService {
    gateway: ApiGateway,
}

impl RecordService {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn list_for_patient(&self, patient_id: &str) -> Result<Vec<Value>> {
        let val = self
            .gateway
            .get(&format!("/patients/{}/records", patient_id))
            .await
            .context("failed to load medical records")?;
        Ok(normalize::coerce_list(val))
    }

    pub async fn create(&self, patient_id: &str, record: &Value) -> Result<Value> {
        let val = self
            .gateway
            .post(&format!("/patients/{}/records", patient_id), record)
            .await
            .context("failed to create medical record")?;
        Ok(normalize::coerce_object(val))
    }
}
