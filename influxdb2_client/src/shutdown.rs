//! Client teardown

use tracing::debug;

use crate::{Client, api::WriteClient};

impl Client {
    /// Ensure all asynchronous write clients finish, then release resources
    ///
    /// Every cached write client is drained and dropped from the cache; both caches are empty
    /// afterwards. If the connection pool was created by the client rather than supplied in
    /// [`Options`](crate::Options), its idle connections are released too.
    ///
    /// Calling it again is harmless. Write clients requested after `close` are created afresh.
    pub async fn close(&self) {
        let mut registry = self.registry.lock().await;

        let write_apis: Vec<_> = registry.write_apis.drain().collect();
        for (key, write_api) in write_apis {
            debug!(%key, "draining write client");
            write_api.drain().await;
        }
        let write_apis_blocking: Vec<_> = registry.write_apis_blocking.drain().collect();
        for (_, write_api) in write_apis_blocking {
            write_api.drain().await;
        }
        registry.closed = true;

        if self.http.owns_http_client() {
            self.http.release_idle_connections();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use mockito::{Matcher, Server};

    use crate::{Client, Error, Options};

    #[tokio::test]
    async fn close_empties_both_write_caches() {
        let client = Client::new("http://localhost:8086", "my-token").unwrap();
        client.write_api("org", "a").await;
        client.write_api("org", "b").await;
        client.write_api_blocking("org", "a").await;

        client.close().await;

        let registry = client.registry.lock().await;
        assert!(registry.write_apis.is_empty());
        assert!(registry.write_apis_blocking.is_empty());
    }

    #[tokio::test]
    async fn close_drains_pending_points() {
        let mut mock_server = Server::new_async().await;
        let mock = mock_server
            .mock("POST", "/api/v2/write")
            .match_query(Matcher::Any)
            .match_body("m v=1i\nm v=2i")
            .with_status(204)
            .expect(1)
            .create_async()
            .await;

        let options = Options::default().with_flush_interval(Duration::from_secs(3600));
        let client = Client::with_options(mock_server.url(), "my-token", options).unwrap();
        let write_api = client.write_api("org", "bucket").await;
        write_api.write_record("m v=1i").unwrap();
        write_api.write_record("m v=2i").unwrap();

        client.close().await;

        mock.assert_async().await;
        assert!(matches!(
            write_api.write_record("m v=3i"),
            Err(Error::WriteClosed { .. })
        ));
    }

    #[tokio::test]
    async fn write_api_after_close_is_a_new_instance() {
        let client = Client::new("http://localhost:8086", "my-token").unwrap();
        let before = client.write_api("org", "bucket").await;

        client.close().await;
        // closing twice does not disturb anything
        client.close().await;

        let after = client.write_api("org", "bucket").await;
        assert!(!Arc::ptr_eq(&before, &after));
        after.write_record("m v=1i").unwrap();
        assert_eq!(client.registry.lock().await.write_apis.len(), 1);
    }

    #[tokio::test]
    async fn caller_supplied_pool_survives_close() {
        let http_client = reqwest::Client::new();
        let options = Options::default().with_http_client(http_client);
        let client = Client::with_options("http://localhost:8086", "", options).unwrap();
        assert!(!client.http_service().owns_http_client());

        client.close().await;
        assert!(!client.http_service().is_authorized());
    }
}
