//! Query API

use std::sync::Arc;

use reqwest::{Method, StatusCode, header::ACCEPT};

use crate::{
    Error, Result,
    http::{HttpService, decode_error},
    models::{Dialect, Query},
};

/// Client running Flux queries on behalf of one organization
///
/// Holds no state besides the org, which is why the [`Client`](crate::Client) hands out a new
/// one on every call.
#[derive(Debug)]
pub struct QueryApi {
    org: String,
    http: Arc<HttpService>,
}

impl QueryApi {
    pub(crate) fn new(org: &str, http: Arc<HttpService>) -> Self {
        Self {
            org: org.to_string(),
            http,
        }
    }

    /// Organization the queries run in
    pub fn org(&self) -> &str {
        &self.org
    }

    /// Run `query` and return the raw CSV response
    ///
    /// Without a `dialect` the response is annotated CSV.
    pub async fn query_raw(&self, query: &str, dialect: Option<Dialect>) -> Result<String> {
        let body = Query::new(query, dialect.unwrap_or_else(Dialect::annotated_csv));
        let response = self
            .http
            .execute(Method::POST, "api/v2/query", |req| {
                req.query(&[("org", self.org.as_str())])
                    .header(ACCEPT, "text/csv")
                    .json(&body)
            })
            .await?;
        match response.status() {
            StatusCode::OK => response.text().await.map_err(Error::Text),
            _ => Err(decode_error(response).await),
        }
    }
}
