//! Onboarding

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    models::{Authorization, Bucket, Organization, User},
};

/// Body of the request that initialises a new server
///
/// The retention period is sent twice: in seconds, and as a duration in the server's native
/// unit (nanoseconds), so both older and newer servers understand it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OnboardingRequest {
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) org: String,
    pub(crate) bucket: String,
    pub(crate) retention_period_seconds: i64,
    pub(crate) retention_period_hrs: i64,
}

impl OnboardingRequest {
    pub(crate) fn new(
        username: &str,
        password: &str,
        org: &str,
        bucket: &str,
        retention_period_hours: u32,
    ) -> Result<Self> {
        let retention_period_seconds = i64::from(retention_period_hours) * 3600;
        let retention = Duration::from_secs(u64::from(retention_period_hours) * 3600);
        let retention_period_hrs = i64::try_from(retention.as_nanos()).map_err(|_| {
            Error::validation(format!(
                "retention period of {retention_period_hours} hours is too long"
            ))
        })?;
        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
            org: org.to_string(),
            bucket: bucket.to_string(),
            retention_period_seconds,
            retention_period_hrs,
        })
    }
}

/// Entities created by a successful onboarding
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct OnboardingResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// The created organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<Organization>,
    /// The created bucket
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<Bucket>,
    /// The authorization whose token is installed on the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<Authorization>,
}

/// Whether the server still accepts onboarding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsOnboarding {
    /// `true` if the server has not been set up yet
    pub allowed: bool,
}
