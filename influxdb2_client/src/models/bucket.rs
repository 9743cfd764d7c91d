//! Buckets

use serde::{Deserialize, Serialize};

use crate::models::Links;

/// Bucket Schema
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    /// Bucket ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// ID of the organization owning the bucket
    #[serde(rename = "orgID", skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    /// Bucket name
    pub name: String,
    /// Bucket description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Rules to expire or retain data. No rules means data never expire.
    #[serde(default)]
    pub retention_rules: Vec<RetentionRule>,
    /// Time the bucket was created, RFC3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Time the bucket was last updated, RFC3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Retention rule of a bucket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionRule {
    #[serde(rename = "type")]
    pub r#type: RetentionRuleType,
    /// Duration in seconds for how long data will be kept in the database.
    /// 0 means infinite.
    pub every_seconds: i64,
}

impl RetentionRule {
    /// Expire data older than `every_seconds`
    pub fn expire(every_seconds: i64) -> Self {
        Self {
            r#type: RetentionRuleType::Expire,
            every_seconds,
        }
    }
}

/// Kind of retention rule
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RetentionRuleType {
    /// Delete data older than the rule's duration
    Expire,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostBucketRequest {
    #[serde(rename = "orgID")]
    pub(crate) org_id: String,
    pub(crate) name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    pub(crate) retention_rules: Vec<RetentionRule>,
}

/// List of buckets
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Buckets {
    /// Pagination links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    /// Buckets of this page
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}
