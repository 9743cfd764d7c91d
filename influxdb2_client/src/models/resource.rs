//! Resources

use serde::{Deserialize, Serialize};

/// Resource a [`Permission`](crate::models::Permission) applies to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub r#type: ResourceType,
    /// If set, the permission applies to this resource only; otherwise to
    /// every resource of the type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Name of the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// If set, the permission applies to resources owned by this org only.
    #[serde(rename = "orgID", skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    /// Name of the organization owning the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
}

impl Resource {
    /// Every resource of `r#type`
    pub fn new(r#type: ResourceType) -> Self {
        Self {
            r#type,
            id: None,
            name: None,
            org_id: None,
            org: None,
        }
    }

    /// Every resource of `r#type` owned by the org `org_id`
    pub fn in_org(r#type: ResourceType, org_id: impl Into<String>) -> Self {
        Self {
            org_id: Some(org_id.into()),
            ..Self::new(r#type)
        }
    }
}

/// Kind of resource a permission applies to
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceType {
    /// Authorizations
    Authorizations,
    /// Buckets
    Buckets,
    /// Dashboards
    Dashboards,
    /// Organizations
    Orgs,
    /// Sources
    Sources,
    /// Tasks
    Tasks,
    /// Telegraf configurations
    Telegrafs,
    /// Users
    Users,
    /// Variables
    Variables,
    /// Scrapers
    Scrapers,
    /// Secrets
    Secrets,
    /// Labels
    Labels,
    /// Views
    Views,
    /// Documents
    Documents,
    /// Notification rules
    NotificationRules,
    /// Notification endpoints
    NotificationEndpoints,
    /// Checks
    Checks,
    /// Database and retention policy mappings
    Dbrp,
}
