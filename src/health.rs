//! Liveness and configuration health.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{SERVICE_NAME, SERVICE_VERSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Healthy,
    ConfigurationMissing,
}

/// Health report, computed fresh on every check
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: HealthState,
    pub timestamp: DateTime<Utc>,
    pub service: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl HealthStatus {
    /// HTTP status for this report: 200 when healthy, 503 otherwise
    pub fn http_status(&self) -> StatusCode {
        match self.status {
            HealthState::Healthy => StatusCode::OK,
            HealthState::ConfigurationMissing => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Reports whether the process is configured to reach HubSpot.
#[derive(Debug, Clone, Copy)]
pub struct HealthReporter {
    token_configured: bool,
}

impl HealthReporter {
    pub fn new(token_configured: bool) -> Self {
        Self { token_configured }
    }

    pub fn check(&self) -> HealthStatus {
        let (status, warning) = if self.token_configured {
            (HealthState::Healthy, None)
        } else {
            (
                HealthState::ConfigurationMissing,
                Some("HubSpot token not configured".to_string()),
            )
        };

        HealthStatus {
            status,
            timestamp: Utc::now(),
            service: SERVICE_NAME,
            version: SERVICE_VERSION,
            warning,
        }
    }
}
