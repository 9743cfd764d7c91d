//! Labels

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Links;

/// Label
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Label {
    /// Label ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Org ID
    #[serde(rename = "orgID", skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    /// Label name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Key/Value pairs associated with this label. Keys can be removed by
    /// sending an update with an empty value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, String>>,
}

/// A single label as returned by the server
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelResponse {
    /// The label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    /// Links to related resources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// List of labels
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelsResponse {
    /// Labels of this page
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Pagination links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct LabelCreateRequest {
    #[serde(rename = "orgID")]
    pub(crate) org_id: String,
    pub(crate) name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) properties: Option<HashMap<String, String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize)]
pub(crate) struct LabelUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) properties: Option<HashMap<String, String>>,
}
