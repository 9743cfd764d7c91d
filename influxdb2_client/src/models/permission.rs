//! Permissions

use serde::{Deserialize, Serialize};

use crate::models::Resource;

/// Action allowed on a resource
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Access granted
    pub action: Action,
    /// Resource the access applies to
    pub resource: Resource,
}

impl Permission {
    /// Returns a permission granting `action` on `resource`
    pub fn new(action: Action, resource: Resource) -> Self {
        Self { action, resource }
    }
}

/// Kind of access
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Read access
    Read,
    /// Write access
    Write,
}
