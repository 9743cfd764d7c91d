#![warn(missing_docs)]

//! # influxdb2_client
//!
//! This is a Rust client to InfluxDB using the [2.0 API][2api].
//!
//! [2api]: https://docs.influxdata.com/influxdb/v2/api/
//!
//! A [`Client`] is the entry point. It hands out one sub-client per area of the API:
//!
//! - [`write_api`](Client::write_api) and [`write_api_blocking`](Client::write_api_blocking)
//!   return one instance per org and bucket pair, for the lifetime of the client.
//! - [`query_api`](Client::query_api) returns a fresh, stateless instance on every call.
//! - the other accessors each return a single shared instance.
//!
//! [`setup`](Client::setup) onboards a freshly installed server and authenticates the client
//! with the token it returns. [`close`](Client::close) drains every asynchronous write client.
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let client = influxdb2_client::Client::new("http://localhost:8086", "my-token")?;
//!
//! let write_api = client.write_api("my-org", "my-bucket").await;
//! write_api.write_record("cpu,host=server01 usage=0.5")?;
//!
//! client.close().await;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use tracing::info;

use crate::{
    http::{HttpService, decode_error},
    models::HealthCheck,
    registry::Registry,
};

pub mod api;
mod error;
pub mod http;
pub mod models;
pub mod options;
mod registry;
mod setup;
mod shutdown;

pub use error::{Error, ErrorKind, Result};
pub use models::{DataPoint, FieldValue};
pub use options::{HttpOptions, Options, Precision, WriteOptions};

/// Client to a server supporting the InfluxData 2.0 API.
///
/// Sub-clients share the client's [`HttpService`], and with it the credential and the
/// connection pool. Every method takes `&self`; wrap the client in an [`Arc`] to use it from
/// several tasks.
#[derive(Debug)]
pub struct Client {
    /// The server URL as given at construction
    server_url: String,
    options: Arc<Options>,
    http: Arc<HttpService>,
    /// Guards the sub-client caches, and serializes onboarding with their creation
    registry: tokio::sync::Mutex<Registry>,
}

impl Client {
    /// Create a new client pointing to the URL specified in `protocol://server:port` format,
    /// using the default [`Options`].
    ///
    /// `auth_token` may be empty when talking to a server that has not been set up yet; a
    /// successful [`setup`](Self::setup) then provides the token.
    ///
    /// # Example
    ///
    /// ```
    /// let client = influxdb2_client::Client::new("http://localhost:8086", "my-token")
    ///     .expect("valid URL");
    /// assert_eq!(client.server_url(), "http://localhost:8086");
    /// ```
    pub fn new(server_url: impl Into<String>, auth_token: impl AsRef<str>) -> Result<Self> {
        Self::with_options(server_url, auth_token, Options::default())
    }

    /// Create a new client configured with custom [`Options`]
    pub fn with_options(
        server_url: impl Into<String>,
        auth_token: impl AsRef<str>,
        options: Options,
    ) -> Result<Self> {
        let server_url = server_url.into();
        let auth_token = auth_token.as_ref();
        let authorization = (!auth_token.is_empty()).then(|| format!("Token {auth_token}"));
        let http = HttpService::new(
            &server_url,
            authorization,
            options.http_options(),
            options.log_level(),
        )?;
        info!(
            %server_url,
            authenticated = !auth_token.is_empty(),
            "created InfluxDB client"
        );

        Ok(Self {
            server_url,
            options: Arc::new(options),
            http: Arc::new(http),
            registry: tokio::sync::Mutex::new(Registry::default()),
        })
    }

    /// The options the client was created with
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The server URL the client talks to
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// The transport shared by the client and its sub-clients
    pub fn http_service(&self) -> Arc<HttpService> {
        Arc::clone(&self.http)
    }

    /// Check that the server is up; does not validate the credential
    pub async fn ready(&self) -> Result<bool> {
        let response = self.http.execute(Method::GET, "ready", |req| req).await?;
        match response.status() {
            StatusCode::OK => Ok(true),
            _ => Err(decode_error(response).await),
        }
    }

    /// Get the server's health; does not validate the credential
    ///
    /// An unhealthy server is not an error: its [`HealthCheck`] is returned with a failing
    /// [`status`](HealthCheck::status).
    pub async fn health(&self) -> Result<HealthCheck> {
        let response = self.http.execute(Method::GET, "health", |req| req).await?;
        match response.status() {
            StatusCode::OK | StatusCode::SERVICE_UNAVAILABLE => {
                response.json::<HealthCheck>().await.map_err(Error::Json)
            }
            _ => Err(decode_error(response).await),
        }
    }
}
