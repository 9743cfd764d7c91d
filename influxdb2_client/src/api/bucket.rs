//! Buckets API

use std::sync::Arc;

use reqwest::{Method, StatusCode};

use crate::{
    Result,
    http::{HttpService, empty_response, json_response},
    models::{Bucket, Buckets, PostBucketRequest, RetentionRule},
};

/// Client managing buckets
#[derive(Debug)]
pub struct BucketsApi {
    http: Arc<HttpService>,
}

impl BucketsApi {
    pub(crate) fn new(http: Arc<HttpService>) -> Self {
        Self { http }
    }

    /// List buckets, optionally only those of the organization named `org`
    pub async fn find_buckets(&self, org: Option<&str>) -> Result<Vec<Bucket>> {
        let response = self
            .http
            .execute(Method::GET, "api/v2/buckets", |req| match org {
                Some(org) => req.query(&[("org", org)]),
                None => req,
            })
            .await?;
        let buckets: Buckets = json_response(response, StatusCode::OK).await?;
        Ok(buckets.buckets)
    }

    /// Look up a bucket by name
    pub async fn find_bucket_by_name(&self, name: &str) -> Result<Option<Bucket>> {
        let response = self
            .http
            .execute(Method::GET, "api/v2/buckets", |req| {
                req.query(&[("name", name)])
            })
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let buckets: Buckets = json_response(response, StatusCode::OK).await?;
        Ok(buckets.buckets.into_iter().find(|b| b.name == name))
    }

    /// Create a bucket in the organization `org_id`
    ///
    /// Data older than `retention_seconds` expires; `None` keeps data forever.
    pub async fn create_bucket(
        &self,
        org_id: &str,
        name: &str,
        retention_seconds: Option<i64>,
    ) -> Result<Bucket> {
        let body = PostBucketRequest {
            org_id: org_id.to_string(),
            name: name.to_string(),
            description: None,
            retention_rules: retention_seconds
                .map(RetentionRule::expire)
                .into_iter()
                .collect(),
        };
        let response = self
            .http
            .execute(Method::POST, "api/v2/buckets", |req| req.json(&body))
            .await?;
        json_response(response, StatusCode::CREATED).await
    }

    /// Delete a bucket and all of its data
    pub async fn delete_bucket(&self, bucket_id: &str) -> Result<()> {
        let response = self
            .http
            .execute_on(
                Method::DELETE,
                "api/v2/buckets",
                bucket_id,
                |req| req,
            )
            .await?;
        empty_response(response, StatusCode::NO_CONTENT).await
    }
}
