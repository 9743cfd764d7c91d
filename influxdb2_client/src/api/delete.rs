//! Delete API

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Method, StatusCode};

use crate::{
    Error, Result,
    http::{HttpService, empty_response},
    models::DeletePredicateRequest,
};

/// Client deleting time series data
#[derive(Debug)]
pub struct DeleteApi {
    http: Arc<HttpService>,
}

impl DeleteApi {
    pub(crate) fn new(http: Arc<HttpService>) -> Self {
        Self { http }
    }

    /// Delete points of `bucket` in `org` between `start` and `stop`
    ///
    /// `predicate`, e.g. `_measurement="cpu" and host="a"`, narrows which points are deleted;
    /// without one every point in the time range goes.
    pub async fn delete(
        &self,
        org: &str,
        bucket: &str,
        start: DateTime<Utc>,
        stop: DateTime<Utc>,
        predicate: Option<&str>,
    ) -> Result<()> {
        if stop < start {
            return Err(Error::validation(format!(
                "delete range ends ({stop}) before it starts ({start})"
            )));
        }
        let body = DeletePredicateRequest {
            start: start.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            stop: stop.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            predicate: predicate.map(ToString::to_string),
        };
        let response = self
            .http
            .execute(Method::POST, "api/v2/delete", |req| {
                req.query(&[("org", org), ("bucket", bucket)]).json(&body)
            })
            .await?;
        empty_response(response, StatusCode::NO_CONTENT).await
    }
}
