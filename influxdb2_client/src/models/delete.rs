//! Delete predicate

use serde::Serialize;

/// Body of a delete request
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct DeletePredicateRequest {
    /// RFC3339Nano
    pub(crate) start: String,
    /// RFC3339Nano
    pub(crate) stop: String,
    /// SQL-like predicate expression, e.g. `tag1="value1" and (tag2="value2")`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) predicate: Option<String>,
}
