//! Health check

use serde::{Deserialize, Serialize};

/// Result of a server health check
///
/// Also returned for an unhealthy server: read [`status`](Self::status) to find out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Name of the checked service
    pub name: String,
    /// Human readable detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Checks of dependent services
    #[serde(default)]
    pub checks: Vec<HealthCheck>,
    /// Overall outcome
    pub status: HealthStatus,
    /// Server version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Server build commit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

impl HealthCheck {
    /// `true` if the server reported [`HealthStatus::Pass`]
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Pass
    }
}

/// Outcome of a health check
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HealthStatus {
    /// Healthy
    Pass,
    /// Unhealthy
    Fail,
}
