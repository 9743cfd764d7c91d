//! Synchronous, blocking Write API

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;

use crate::{
    Result,
    api::write::{WriteClient, post_write},
    http::HttpService,
    models::DataPoint,
    options::{Precision, WriteOptions},
};

/// Client writing to one org and bucket, one request per call
///
/// Nothing is buffered: each call returns once the server accepted, or rejected, the data.
#[derive(Debug)]
pub struct WriteApiBlocking {
    org: String,
    bucket: String,
    precision: Precision,
    default_tags: BTreeMap<String, String>,
    http: Arc<HttpService>,
}

impl WriteApiBlocking {
    pub(crate) fn new(
        org: &str,
        bucket: &str,
        http: Arc<HttpService>,
        options: &WriteOptions,
    ) -> Self {
        Self {
            org: org.to_string(),
            bucket: bucket.to_string(),
            precision: options.precision(),
            default_tags: options.default_tags().clone(),
            http,
        }
    }

    /// Write lines of line protocol
    pub async fn write_record<I, S>(&self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S> + Send,
        S: AsRef<str>,
    {
        let body = lines
            .into_iter()
            .map(|line| line.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        if body.is_empty() {
            return Ok(());
        }
        post_write(&self.http, &self.org, &self.bucket, self.precision, body).await
    }

    /// Write [`DataPoint`]s
    pub async fn write_point(&self, points: &[DataPoint]) -> Result<()> {
        self.write_record(
            points
                .iter()
                .map(|point| point.to_line_protocol(&self.default_tags))
                .collect::<Vec<_>>(),
        )
        .await
    }
}

#[async_trait]
impl WriteClient for WriteApiBlocking {
    fn org(&self) -> &str {
        &self.org
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Nothing is buffered, so there is nothing to drain
    async fn drain(&self) {}
}
