//! Authorizations

use serde::{Deserialize, Serialize};

use crate::models::{Links, Permission};

/// An API token together with the permissions it grants
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    /// If inactive the token is inactive and requests using the token will be
    /// rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AuthorizationStatus>,
    /// A description of the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Time the authorization was created, RFC3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Time the authorization was last updated, RFC3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// ID of org that authorization is scoped to.
    #[serde(rename = "orgID")]
    pub org_id: String,
    /// List of permissions for an auth. An auth must have at least one
    /// Permission.
    #[serde(default)]
    pub permissions: Vec<Permission>,
    /// Authorization ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Passed via the Authorization Header and Token Authentication type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// ID of user that created and owns the token.
    #[serde(rename = "userID", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Name of user that created and owns the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Name of the org token is scoped to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
}

impl Authorization {
    /// Returns an authorization to create for `org_id`
    pub fn new(org_id: impl Into<String>, permissions: Vec<Permission>) -> Self {
        Self {
            org_id: org_id.into(),
            permissions,
            ..Default::default()
        }
    }
}

/// If inactive the token is inactive and requests using the token will be
/// rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthorizationStatus {
    /// Token is accepted
    Active,
    /// Token is rejected
    Inactive,
}

/// Body of an authorization status update
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct AuthorizationUpdateRequest {
    pub(crate) status: AuthorizationStatus,
}

/// List of authorizations
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Authorizations {
    /// Pagination links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    /// Authorizations of this page
    #[serde(default)]
    pub authorizations: Vec<Authorization>,
}
