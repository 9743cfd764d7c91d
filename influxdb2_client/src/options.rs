//! Client configuration
//!
//! [`Options`] is created once, handed to [`Client::with_options`](crate::Client::with_options)
//! and shared, unchanged, by every sub-client the facade hands out.

use std::{collections::BTreeMap, fmt::Display, time::Duration};

use tracing::level_filters::LevelFilter;

/// Default number of lines sent in one write request
pub const DEFAULT_BATCH_SIZE: usize = 5_000;
/// Default interval after which buffered lines are sent even if the batch is not full
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(1);
/// Shortest accepted flush interval
pub const MIN_FLUSH_INTERVAL: Duration = Duration::from_millis(1);
/// Default deadline for a single HTTP request
pub const DEFAULT_HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Timestamp precision of written points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Precision {
    /// Nanoseconds
    #[default]
    Nanoseconds,
    /// Microseconds
    Microseconds,
    /// Milliseconds
    Milliseconds,
    /// Seconds
    Seconds,
}

impl Precision {
    /// Value of the `precision` query parameter of the write endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nanoseconds => "ns",
            Self::Microseconds => "us",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
        }
    }
}

impl Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options used by the write clients
#[derive(Debug, Clone)]
pub struct WriteOptions {
    batch_size: usize,
    flush_interval: Duration,
    precision: Precision,
    default_tags: BTreeMap<String, String>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            precision: Precision::default(),
            default_tags: BTreeMap::new(),
        }
    }
}

impl WriteOptions {
    /// Maximum number of lines sent in one write request
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Interval at which the asynchronous write client flushes its buffer
    pub fn flush_interval(&self) -> Duration {
        self.flush_interval
    }

    /// Precision of point timestamps
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Tags added to every point that does not set them itself
    pub fn default_tags(&self) -> &BTreeMap<String, String> {
        &self.default_tags
    }
}

/// Options used by the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpOptions {
    http_request_timeout: Duration,
    http_client: Option<reqwest::Client>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            http_request_timeout: DEFAULT_HTTP_REQUEST_TIMEOUT,
            http_client: None,
        }
    }
}

impl HttpOptions {
    /// Deadline for a single HTTP request
    pub fn http_request_timeout(&self) -> Duration {
        self.http_request_timeout
    }

    /// The caller-supplied [`reqwest::Client`], if any
    pub fn http_client(&self) -> Option<&reqwest::Client> {
        self.http_client.as_ref()
    }

    /// `true` when the connection pool is created, and therefore released, by the client
    pub fn owns_http_client(&self) -> bool {
        self.http_client.is_none()
    }
}

/// Configuration of a [`Client`](crate::Client)
///
/// # Example
/// ```
/// # use std::time::Duration;
/// # use influxdb2_client::{Options, Precision};
/// let options = Options::default()
///     .with_batch_size(1_000)
///     .with_flush_interval(Duration::from_millis(500))
///     .with_precision(Precision::Milliseconds)
///     .with_default_tag("region", "us-west");
/// assert_eq!(options.write_options().batch_size(), 1_000);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    write: WriteOptions,
    http: HttpOptions,
    log_level: LevelFilter,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            write: WriteOptions::default(),
            http: HttpOptions::default(),
            log_level: LevelFilter::ERROR,
        }
    }
}

impl Options {
    /// Set the number of lines sent in one write request; zero is treated as one
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.write.batch_size = batch_size.max(1);
        self
    }

    /// Set the interval at which buffered lines are sent; it is at least [`MIN_FLUSH_INTERVAL`]
    pub fn with_flush_interval(mut self, flush_interval: Duration) -> Self {
        self.write.flush_interval = flush_interval.max(MIN_FLUSH_INTERVAL);
        self
    }

    /// Set the precision of point timestamps
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.write.precision = precision;
        self
    }

    /// Add a tag written with every point, unless the point sets the same tag
    pub fn with_default_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.write.default_tags.insert(key.into(), value.into());
        self
    }

    /// Set the deadline for a single HTTP request
    pub fn with_http_request_timeout(mut self, timeout: Duration) -> Self {
        self.http.http_request_timeout = timeout;
        self
    }

    /// Use a caller-owned [`reqwest::Client`]
    ///
    /// Its connection pool is shared with the caller and is never released by
    /// [`Client::close`](crate::Client::close).
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http.http_client = Some(http_client);
        self
    }

    /// Most verbose level at which the client emits its own events
    pub fn with_log_level(mut self, log_level: LevelFilter) -> Self {
        self.log_level = log_level;
        self
    }

    /// Options used by the write clients
    pub fn write_options(&self) -> &WriteOptions {
        &self.write
    }

    /// Options used by the HTTP transport
    pub fn http_options(&self) -> &HttpOptions {
        &self.http
    }

    /// Most verbose level at which the client emits its own events
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::default();
        assert_eq!(options.write_options().batch_size(), DEFAULT_BATCH_SIZE);
        assert_eq!(
            options.write_options().flush_interval(),
            DEFAULT_FLUSH_INTERVAL
        );
        assert_eq!(options.write_options().precision(), Precision::Nanoseconds);
        assert!(options.write_options().default_tags().is_empty());
        assert!(options.http_options().owns_http_client());
        assert_eq!(options.log_level(), LevelFilter::ERROR);
    }

    #[test]
    fn zero_batch_size_is_clamped() {
        let options = Options::default().with_batch_size(0);
        assert_eq!(options.write_options().batch_size(), 1);
    }

    #[test]
    fn zero_flush_interval_is_clamped() {
        let options = Options::default().with_flush_interval(Duration::ZERO);
        assert_eq!(options.write_options().flush_interval(), MIN_FLUSH_INTERVAL);

        let options = Options::default().with_flush_interval(Duration::from_millis(250));
        assert_eq!(
            options.write_options().flush_interval(),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn caller_supplied_http_client_is_not_owned() {
        let options = Options::default().with_http_client(reqwest::Client::new());
        assert!(!options.http_options().owns_http_client());
    }
}
