//! Organizations

use serde::{Deserialize, Serialize};

use crate::models::Links;

/// Organization Schema
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Organization ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Organization name
    pub name: String,
    /// Organization description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Time the organization was created, RFC3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Time the organization was last updated, RFC3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// If inactive the organization is inactive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrganizationStatus>,
}

/// Whether an organization is active
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrganizationStatus {
    /// Active
    Active,
    /// Inactive
    Inactive,
}

/// Body of an organization creation request
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct PostOrganizationRequest {
    pub(crate) name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
}

/// List of organizations
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Organizations {
    /// Pagination links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    /// Organizations of this page
    #[serde(default)]
    pub orgs: Vec<Organization>,
}
