//! HTTP transport shared by the facade and every sub-client it creates

use std::time::Duration;

use parking_lot::RwLock;
use reqwest::{
    Method, RequestBuilder, Response, StatusCode,
    header::{AUTHORIZATION, USER_AGENT},
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, level_filters::LevelFilter, warn};
use url::Url;

use crate::{Error, Result, options::HttpOptions};

/// `User-Agent` sent with every request
pub fn user_agent() -> String {
    format!(
        "influxdb2-client-rust/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Performs the HTTP calls of a [`Client`](crate::Client)
///
/// Holds the credential sent as the `Authorization` header. It can be swapped at runtime, which
/// is how a successful [`setup`](crate::Client::setup) authenticates everything that follows.
#[derive(Debug)]
pub struct HttpService {
    /// Base URL, always ending with `/` so API paths can be joined onto it
    server_url: Url,
    authorization: RwLock<Option<Secret<String>>>,
    http_client: RwLock<reqwest::Client>,
    owns_http_client: bool,
    request_timeout: Duration,
    log_level: LevelFilter,
}

impl HttpService {
    /// Create a new [`HttpService`]
    ///
    /// `authorization` is the full header value, e.g. `Token my-token`; `None` sends no header.
    pub fn new(
        server_url: &str,
        authorization: Option<String>,
        options: &HttpOptions,
        log_level: LevelFilter,
    ) -> Result<Self> {
        let mut normalized = server_url.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let server_url = Url::parse(&normalized).map_err(Error::BaseUrl)?;

        let (http_client, owns_http_client) = match options.http_client() {
            Some(client) => (client.clone(), false),
            None => (build_http_client()?, true),
        };

        Ok(Self {
            server_url,
            authorization: RwLock::new(authorization.map(Secret::new)),
            http_client: RwLock::new(http_client),
            owns_http_client,
            request_timeout: options.http_request_timeout(),
            log_level,
        })
    }

    /// The normalized base URL
    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    /// Replace the `Authorization` header value sent with every subsequent request
    pub fn set_authorization(&self, authorization: impl Into<String>) {
        *self.authorization.write() = Some(Secret::new(authorization.into()));
    }

    /// `true` if requests are sent with an `Authorization` header
    pub fn is_authorized(&self) -> bool {
        self.authorization.read().is_some()
    }

    /// `true` if the connection pool was created by this service rather than the caller
    pub fn owns_http_client(&self) -> bool {
        self.owns_http_client
    }

    /// Drop the idle connections of an internally created connection pool
    ///
    /// The pool is replaced by a fresh one; the old pool goes away once requests still in
    /// flight on it complete. A caller-supplied pool is left alone.
    pub fn release_idle_connections(&self) {
        if !self.owns_http_client {
            return;
        }
        match build_http_client() {
            Ok(client) => {
                *self.http_client.write() = client;
                debug!(server_url = %self.server_url, "released idle HTTP connections");
            }
            Err(error) => {
                warn!(%error, "failed to rebuild HTTP client, keeping existing connection pool")
            }
        }
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        if self.log_level >= LevelFilter::DEBUG {
            debug!(%method, %url, "sending request");
        }
        let mut req = self
            .http_client
            .read()
            .request(method, url)
            .header(USER_AGENT, user_agent())
            .timeout(self.request_timeout);
        if let Some(authorization) = self.authorization.read().as_ref() {
            req = req.header(AUTHORIZATION, authorization.expose_secret());
        }
        req
    }

    /// Send a request to `path`, relative to the base URL
    ///
    /// `build` adds the query, headers and body to the prepared request.
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder + Send,
    ) -> Result<Response> {
        let url = self.server_url.join(path)?;
        self.send(method, url, build).await
    }

    /// Send a request to the member `id` of the collection at `path`
    ///
    /// `id` is percent-encoded into a single path segment, so it can never address another
    /// endpoint.
    pub(crate) async fn execute_on(
        &self,
        method: Method,
        path: &str,
        id: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder + Send,
    ) -> Result<Response> {
        let url = member_url(self.server_url.join(path)?, id)?;
        self.send(method, url, build).await
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder + Send,
    ) -> Result<Response> {
        let path = url.path().to_string();
        let req = build(self.request(method.clone(), url));
        req.send()
            .await
            .map_err(|source| Error::request_send(method, path, source))
    }
}

/// Append `id` to `collection` as one percent-encoded path segment
fn member_url(mut collection: Url, id: &str) -> Result<Url> {
    if matches!(id, "" | "." | "..") {
        return Err(Error::validation(format!("invalid resource ID '{id}'")));
    }
    collection
        .path_segments_mut()
        .map_err(|_| Error::BaseUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .push(id);
    Ok(collection)
}

fn build_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .build()
        .map_err(Error::HttpClient)
}

/// Error envelope returned by the server alongside a non-success status
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    code: Option<String>,
    message: Option<String>,
}

/// Turn a non-success response into an [`Error::Api`]
///
/// The body is expected to be a JSON error envelope; anything else becomes the message as-is.
pub(crate) async fn decode_error(response: Response) -> Error {
    let status = response.status();
    let text = match response.text().await {
        Ok(text) => text,
        Err(source) => return Error::Text(source),
    };
    match serde_json::from_str::<ErrorEnvelope>(&text) {
        Ok(ErrorEnvelope {
            code,
            message: Some(message),
        }) => Error::Api {
            status,
            code,
            message,
        },
        _ => Error::Api {
            status,
            code: None,
            message: text,
        },
    }
}

/// Parse the body as `T` if the response has the `expected` status
pub(crate) async fn json_response<T: DeserializeOwned>(
    response: Response,
    expected: StatusCode,
) -> Result<T> {
    if response.status() == expected {
        response.json::<T>().await.map_err(Error::Json)
    } else {
        Err(decode_error(response).await)
    }
}

/// Discard the body if the response has the `expected` status
pub(crate) async fn empty_response(response: Response, expected: StatusCode) -> Result<()> {
    if response.status() == expected {
        Ok(())
    } else {
        Err(decode_error(response).await)
    }
}
