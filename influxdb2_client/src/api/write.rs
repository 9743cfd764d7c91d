//! Asynchronous, non-blocking Write API
//!
//! A [`WriteApi`] buffers lines in memory and sends them in the background, in batches of
//! [`WriteOptions::batch_size`] lines or every [`WriteOptions::flush_interval`], whichever comes
//! first. Failed batches are logged and published on [`WriteApi::errors`].

use std::{collections::BTreeMap, fmt::Debug, sync::Arc, time::Duration};

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::{Method, StatusCode};
use tokio::{
    sync::{broadcast, mpsc, oneshot},
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    Error, Result,
    http::{HttpService, decode_error},
    models::DataPoint,
    options::{Precision, WriteOptions},
};

/// Capacity of the channel publishing failed batches
const ERRORS_CAPACITY: usize = 16;

/// Capability shared by both kinds of write client
///
/// Lets the [`Client`](crate::Client) drain every write client it handed out on
/// [`close`](crate::Client::close), without knowing which kind it is.
#[async_trait]
pub trait WriteClient: Debug + Send + Sync {
    /// Organization written to
    fn org(&self) -> &str;

    /// Bucket written to
    fn bucket(&self) -> &str;

    /// Send any buffered data and stop background work
    async fn drain(&self);
}

#[derive(Debug)]
enum Command {
    Record(String),
    Flush(oneshot::Sender<()>),
}

/// Asynchronous, non-blocking client writing to one org and bucket
#[derive(Debug)]
pub struct WriteApi {
    org: String,
    bucket: String,
    default_tags: BTreeMap<String, String>,
    commands: mpsc::UnboundedSender<Command>,
    errors: broadcast::Sender<Arc<Error>>,
    shutdown: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl WriteApi {
    /// Create a [`WriteApi`] and start its background batching task
    ///
    /// Must be called from within a tokio runtime. Performs no I/O.
    pub(crate) fn new(
        org: &str,
        bucket: &str,
        http: Arc<HttpService>,
        options: &WriteOptions,
    ) -> Self {
        let (commands, rx) = mpsc::unbounded_channel();
        let (errors, _) = broadcast::channel(ERRORS_CAPACITY);
        let shutdown = CancellationToken::new();

        let batcher = Batcher {
            org: org.to_string(),
            bucket: bucket.to_string(),
            precision: options.precision(),
            batch_size: options.batch_size(),
            http,
            errors: errors.clone(),
            buffer: Vec::new(),
        };
        let task = tokio::spawn(batcher.run(rx, shutdown.clone(), options.flush_interval()));

        Self {
            org: org.to_string(),
            bucket: bucket.to_string(),
            default_tags: options.default_tags().clone(),
            commands,
            errors,
            shutdown,
            task: Mutex::new(Some(task)),
        }
    }

    /// Queue a line of line protocol for writing
    pub fn write_record(&self, line: impl Into<String>) -> Result<()> {
        if self.shutdown.is_cancelled() {
            return Err(self.closed());
        }
        self.commands
            .send(Command::Record(line.into()))
            .map_err(|_| self.closed())
    }

    /// Queue a [`DataPoint`] for writing
    pub fn write_point(&self, point: &DataPoint) -> Result<()> {
        self.write_record(point.to_line_protocol(&self.default_tags))
    }

    /// Send everything queued so far and wait until it has been written
    ///
    /// A failed write does not fail the flush; it is reported on [`errors`](Self::errors).
    pub async fn flush(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(Command::Flush(tx))
            .map_err(|_| self.closed())?;
        rx.await.map_err(|_| self.closed())
    }

    /// Subscribe to errors of batches that could not be written
    pub fn errors(&self) -> broadcast::Receiver<Arc<Error>> {
        self.errors.subscribe()
    }

    /// Write out everything queued and stop the background task
    ///
    /// Further writes fail with [`Error::WriteClosed`]. Calling this again is a no-op.
    pub async fn close(&self) {
        self.shutdown.cancel();
        let task = self.task.lock().take();
        if let Some(task) = task {
            if let Err(error) = task.await {
                warn!(org = %self.org, bucket = %self.bucket, %error, "write task failed");
            }
        }
    }

    fn closed(&self) -> Error {
        Error::WriteClosed {
            org: self.org.clone(),
            bucket: self.bucket.clone(),
        }
    }
}

#[async_trait]
impl WriteClient for WriteApi {
    fn org(&self) -> &str {
        &self.org
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn drain(&self) {
        self.close().await
    }
}

impl Drop for WriteApi {
    fn drop(&mut self) {
        // stops the batcher if the client was never drained
        self.shutdown.cancel();
    }
}

#[derive(Debug)]
struct Batcher {
    org: String,
    bucket: String,
    precision: Precision,
    batch_size: usize,
    http: Arc<HttpService>,
    errors: broadcast::Sender<Arc<Error>>,
    buffer: Vec<String>,
}

impl Batcher {
    async fn run(
        mut self,
        mut rx: mpsc::UnboundedReceiver<Command>,
        shutdown: CancellationToken,
        flush_interval: Duration,
    ) {
        let mut ticker = tokio::time::interval_at(Instant::now() + flush_interval, flush_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                command = rx.recv() => match command {
                    Some(command) => self.handle(command).await,
                    None => break,
                },
                _ = ticker.tick() => self.flush().await,
            }
        }

        // whatever was queued before shutdown still gets written
        rx.close();
        while let Ok(command) = rx.try_recv() {
            self.handle(command).await;
        }
        self.flush().await;
        debug!(org = %self.org, bucket = %self.bucket, "write client drained");
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Record(line) => {
                self.buffer.push(line);
                if self.buffer.len() >= self.batch_size {
                    self.flush().await;
                }
            }
            Command::Flush(ack) => {
                self.flush().await;
                let _ = ack.send(());
            }
        }
    }

    async fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let lines = self.buffer.len();
        let body = self.buffer.join("\n");
        self.buffer.clear();

        if let Err(error) = post_write(
            &self.http,
            &self.org,
            &self.bucket,
            self.precision,
            body,
        )
        .await
        {
            warn!(org = %self.org, bucket = %self.bucket, lines, %error, "failed to write batch");
            // nobody listening is fine
            let _ = self.errors.send(Arc::new(error));
        }
    }
}

/// Send line protocol to `POST /api/v2/write`
pub(crate) async fn post_write(
    http: &HttpService,
    org: &str,
    bucket: &str,
    precision: Precision,
    body: String,
) -> Result<()> {
    let response = http
        .execute(Method::POST, "api/v2/write", |req| {
            req.query(&[
                ("org", org),
                ("bucket", bucket),
                ("precision", precision.as_str()),
            ])
            .body(body)
        })
        .await?;
    match response.status() {
        StatusCode::NO_CONTENT | StatusCode::OK => Ok(()),
        _ => Err(decode_error(response).await),
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use tracing::level_filters::LevelFilter;

    use super::*;
    use crate::{ErrorKind, Options};

    fn write_api(url: &str, options: &Options) -> WriteApi {
        let http = HttpService::new(
            url,
            Some("Token some-token".into()),
            options.http_options(),
            LevelFilter::OFF,
        )
        .expect("create service");
        WriteApi::new("some-org", "some-bucket", Arc::new(http), options.write_options())
    }

    fn options() -> Options {
        Options::default().with_flush_interval(Duration::from_secs(3600))
    }

    #[tokio::test]
    async fn flush_sends_buffered_lines_in_one_batch() {
        let mut mock_server = Server::new_async().await;
        let mock = mock_server
            .mock("POST", "/api/v2/write")
            .match_header("Authorization", "Token some-token")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("org".into(), "some-org".into()),
                Matcher::UrlEncoded("bucket".into(), "some-bucket".into()),
                Matcher::UrlEncoded("precision".into(), "ns".into()),
            ]))
            .match_body("cpu,host=a usage=0.5\ncpu,host=b usage=0.7")
            .with_status(204)
            .expect(1)
            .create_async()
            .await;

        let w = write_api(&mock_server.url(), &options());
        w.write_record("cpu,host=a usage=0.5").unwrap();
        w.write_record("cpu,host=b usage=0.7").unwrap();
        w.flush().await.unwrap();

        mock.assert_async().await;
        w.close().await;
    }

    #[tokio::test]
    async fn full_batches_are_sent_without_flush() {
        let mut mock_server = Server::new_async().await;
        let mock = mock_server
            .mock("POST", "/api/v2/write")
            .match_query(Matcher::Any)
            .with_status(204)
            .expect(2)
            .create_async()
            .await;

        let w = write_api(&mock_server.url(), &options().with_batch_size(2));
        for i in 0..4 {
            w.write_record(format!("m v={i}i")).unwrap();
        }
        // the flush only acknowledges once the queued batches went out
        w.flush().await.unwrap();

        mock.assert_async().await;
        w.close().await;
    }

    #[tokio::test]
    async fn shortest_flush_interval_keeps_writing() {
        let mut mock_server = Server::new_async().await;
        let mock = mock_server
            .mock("POST", "/api/v2/write")
            .match_query(Matcher::Any)
            .with_status(204)
            .expect_at_least(1)
            .create_async()
            .await;

        let w = write_api(
            &mock_server.url(),
            &Options::default().with_flush_interval(Duration::ZERO),
        );
        w.write_record("m v=1i").unwrap();
        w.flush().await.unwrap();
        w.write_record("m v=2i").unwrap();

        mock.assert_async().await;
        w.close().await;
    }

    #[tokio::test]
    async fn close_drains_and_rejects_further_writes() {
        let mut mock_server = Server::new_async().await;
        let mock = mock_server
            .mock("POST", "/api/v2/write")
            .match_query(Matcher::Any)
            .match_body("m v=1i")
            .with_status(204)
            .expect(1)
            .create_async()
            .await;

        let w = write_api(&mock_server.url(), &options());
        w.write_record("m v=1i").unwrap();
        w.drain().await;
        mock.assert_async().await;

        let err = w.write_record("m v=2i").unwrap_err();
        assert!(matches!(err, Error::WriteClosed { .. }));
        assert_eq!(err.kind(), ErrorKind::Validation);

        // second close is a no-op
        w.close().await;
    }

    #[tokio::test]
    async fn failed_batches_are_published() {
        let mut mock_server = Server::new_async().await;
        let _mock = mock_server
            .mock("POST", "/api/v2/write")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"code":"invalid","message":"unable to parse 'garbage'"}"#)
            .create_async()
            .await;

        let w = write_api(&mock_server.url(), &options());
        let mut errors = w.errors();
        w.write_record("garbage").unwrap();
        w.flush().await.unwrap();

        let error = errors.recv().await.expect("error published");
        assert_eq!(error.kind(), ErrorKind::Api);
        assert_eq!(error.status(), Some(StatusCode::BAD_REQUEST));
        w.close().await;
    }

    #[tokio::test]
    async fn points_carry_default_tags() {
        let mut mock_server = Server::new_async().await;
        let mock = mock_server
            .mock("POST", "/api/v2/write")
            .match_query(Matcher::UrlEncoded("precision".into(), "ms".into()))
            .match_body("cpu,env=test,host=a usage=1i 10")
            .with_status(204)
            .create_async()
            .await;

        let options = options()
            .with_default_tag("env", "test")
            .with_precision(Precision::Milliseconds);
        let w = write_api(&mock_server.url(), &options);
        let point = DataPoint::builder("cpu")
            .tag("host", "a")
            .field("usage", 1_i64)
            .timestamp(10)
            .build()
            .unwrap();
        w.write_point(&point).unwrap();
        w.flush().await.unwrap();

        mock.assert_async().await;
        w.close().await;
    }
}
