use reqwest::{Method, StatusCode};

/// Primary error type for the [`Client`](crate::Client) and its sub-clients
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server URL could not be parsed
    #[error("base URL error: {0}")]
    BaseUrl(#[source] url::ParseError),

    /// An API path could not be joined onto the server URL
    #[error("request URL error: {0}")]
    RequestUrl(#[from] url::ParseError),

    /// The HTTP client could not be created
    #[error("failed to build the HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The request was rejected before anything was sent
    #[error("invalid request: {0}")]
    Validation(String),

    /// The response body was not the expected JSON
    #[error("failed to parse JSON response: {0}")]
    Json(#[source] reqwest::Error),

    /// The response body could not be read
    #[error("failed to read the API response text: {0}")]
    Text(#[source] reqwest::Error),

    /// The server answered with an unexpected status
    #[error("server responded with error [{status}]: {message}")]
    Api {
        /// HTTP status of the response
        status: StatusCode,
        /// Error code reported in the server's error envelope, if any
        code: Option<String>,
        /// Message from the error envelope, or the raw response body
        message: String,
    },

    /// Onboarding succeeded but issued no token
    #[error("onboarding response did not contain an authorization token")]
    MissingToken,

    /// The asynchronous write client was closed
    #[error("write client for org '{org}' and bucket '{bucket}' is closed")]
    WriteClosed {
        /// Organization of the closed client
        org: String,
        /// Bucket of the closed client
        bucket: String,
    },

    /// The request could not be sent, or no response arrived
    #[error("failed to send {method} {url} request: {source}")]
    RequestSend {
        /// HTTP method of the request
        method: Method,
        /// Path of the request, relative to the server URL
        url: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },
}

/// Coarse classification of an [`Error`]
///
/// Lets callers tell apart a request that was rejected locally, a server that could not be
/// reached or understood, and a server that rejected the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The operation was invalid as requested and nothing was sent
    Validation,
    /// The server could not be reached, or its response could not be read
    Transport,
    /// The server answered with an error envelope
    Api,
}

impl Error {
    pub(crate) fn request_send(
        method: Method,
        url: impl Into<String>,
        source: reqwest::Error,
    ) -> Self {
        Self::RequestSend {
            method,
            url: url.into(),
            source,
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Which class of failure this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::WriteClosed { .. } => ErrorKind::Validation,
            Self::Api { .. } => ErrorKind::Api,
            Self::BaseUrl(_)
            | Self::RequestUrl(_)
            | Self::HttpClient(_)
            | Self::Json(_)
            | Self::Text(_)
            | Self::MissingToken
            | Self::RequestSend { .. } => ErrorKind::Transport,
        }
    }

    /// The HTTP status reported by the server, for [`ErrorKind::Api`] errors
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` if the request was aborted because it ran past its deadline
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::RequestSend { source, .. } | Self::Json(source) | Self::Text(source) => {
                source.is_timeout()
            }
            _ => false,
        }
    }
}

/// Result type of the client's operations
pub type Result<T, E = Error> = std::result::Result<T, E>;
