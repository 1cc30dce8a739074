use anyhow::{Context, Result};
use serde_json::Value;

use crate::gateway::ApiGateway;

use super::normalize;

/// Appointment scheduling for patients and providers.
pub struct AppointmentService {
    gateway: ApiGateway,
}

impl AppointmentService {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// Current user's appointments, optionally filtered by status and/or day.
    pub async fn list(&self, status: Option<&str>, date: Option<&str>) -> Result<Vec<Value>> {
        let mut pairs: Vec<(&str, &str)> = Vec::new();
        if let Some(s) = status {
            pairs.push(("status", s));
        }
        if let Some(d) = date {
            pairs.push(("date", d));
        }
        let val = self
            .gateway
            .get_with_query("/patients/appointments", &pairs)
            .await
            .context("failed to load appointments")?;
        Ok(normalize::coerce_list(val))
    }

    pub async fn book(&self, appointment: &Value) -> Result<Value> {
        let val = self
            .gateway
            .post("/patients/appointments", appointment)
            .await
            .context("failed to book appointment")?;
        Ok(normalize::coerce_object(val))
    }

    pub async fn cancel(&self, id: &str) -> Result<()> {
        self.gateway
            .delete(&format!("/patients/appointments/{}", id))
            .await
            .context("failed to cancel appointment")?;
        Ok(())
    }
}
