//! Query request

use serde::{Deserialize, Serialize};

/// Query influx using the Flux language
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Query script to execute.
    pub query: String,
    /// The type of query. Must be "flux".
    #[serde(rename = "type")]
    pub r#type: String,
    /// Format of the CSV response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,
}

impl Query {
    /// A Flux query with the given `dialect`
    pub fn new(query: impl Into<String>, dialect: Dialect) -> Self {
        Self {
            query: query.into(),
            r#type: "flux".to_string(),
            dialect: Some(dialect),
        }
    }
}

/// Dialect are options to change the default CSV output format;
/// <https://www.w3.org/TR/2015/REC-tabular-metadata-20151217/#dialect-descriptions>
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dialect {
    /// If true, the results will contain a header row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<bool>,
    /// Separator between cells; the default is ,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
    /// <https://www.w3.org/TR/2015/REC-tabular-data-model-20151217/#columns>
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<Annotations>>,
    /// Character prefixed to comment strings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_prefix: Option<String>,
    /// Format of timestamps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time_format: Option<DateTimeFormat>,
}

impl Dialect {
    /// Annotated CSV with a header row and RFC3339 timestamps
    pub fn annotated_csv() -> Self {
        Self {
            header: Some(true),
            delimiter: Some(",".to_string()),
            annotations: Some(vec![
                Annotations::Datatype,
                Annotations::Group,
                Annotations::Default,
            ]),
            comment_prefix: None,
            date_time_format: Some(DateTimeFormat::Rfc3339),
        }
    }
}

/// <https://www.w3.org/TR/2015/REC-tabular-data-model-20151217/#columns>
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Annotations {
    /// Group annotation row
    Group,
    /// Datatype annotation row
    Datatype,
    /// Default value annotation row
    Default,
}

/// Timestamp Format
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DateTimeFormat {
    /// RFC3339, second precision
    #[serde(rename = "RFC3339")]
    Rfc3339,
    /// RFC3339 with nanoseconds
    #[serde(rename = "RFC3339Nano")]
    Rfc3339Nano,
}
