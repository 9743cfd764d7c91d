//! Links

use serde::{Deserialize, Serialize};

/// Pagination links returned with list responses
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Links {
    /// URI of the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// URI of this page
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_: Option<String>,
    /// URI of the previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}
