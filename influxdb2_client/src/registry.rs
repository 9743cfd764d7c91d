//! Lazily created, cached sub-clients
//!
//! Every accessor takes the client's registry lock, so creation of any sub-client is
//! serialized with creation of every other one and with onboarding. Construction does no I/O,
//! which keeps the critical sections short.

use std::{collections::HashMap, fmt::Display, sync::Arc};

use tracing::{debug, warn};

use crate::{
    Client,
    api::{
        AuthorizationsApi, BucketsApi, DeleteApi, LabelsApi, OrganizationsApi, QueryApi,
        TasksApi, UsersApi, WriteApi, WriteApiBlocking,
    },
};

/// Identity of a write client: the org and bucket it writes to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct WriteKey {
    org: String,
    bucket: String,
}

impl WriteKey {
    pub(crate) fn new(org: &str, bucket: &str) -> Self {
        Self {
            org: org.to_string(),
            bucket: bucket.to_string(),
        }
    }
}

impl Display for WriteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}", self.org, self.bucket)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Registry {
    pub(crate) write_apis: HashMap<WriteKey, Arc<WriteApi>>,
    pub(crate) write_apis_blocking: HashMap<WriteKey, Arc<WriteApiBlocking>>,
    authorizations: Option<Arc<AuthorizationsApi>>,
    organizations: Option<Arc<OrganizationsApi>>,
    users: Option<Arc<UsersApi>>,
    delete: Option<Arc<DeleteApi>>,
    buckets: Option<Arc<BucketsApi>>,
    labels: Option<Arc<LabelsApi>>,
    tasks: Option<Arc<TasksApi>>,
    /// Set once [`Client::close`] has run
    pub(crate) closed: bool,
}

impl Registry {
    fn note_creation(&self, kind: &str, key: &WriteKey) {
        if self.closed {
            warn!(%key, kind, "creating write client after the InfluxDB client was closed");
        } else {
            debug!(%key, kind, "creating write client");
        }
    }
}

impl Client {
    /// The asynchronous, non-blocking write client for `org` and `bucket`
    ///
    /// Repeated calls with the same pair return the same instance.
    pub async fn write_api(&self, org: &str, bucket: &str) -> Arc<WriteApi> {
        let mut registry = self.registry.lock().await;
        let key = WriteKey::new(org, bucket);
        if let Some(write_api) = registry.write_apis.get(&key) {
            return Arc::clone(write_api);
        }
        registry.note_creation("async", &key);
        let write_api = Arc::new(WriteApi::new(
            org,
            bucket,
            Arc::clone(&self.http),
            self.options.write_options(),
        ));
        registry.write_apis.insert(key, Arc::clone(&write_api));
        write_api
    }

    /// The synchronous, blocking write client for `org` and `bucket`
    ///
    /// Repeated calls with the same pair return the same instance. It is independent of the
    /// [`write_api`](Self::write_api) for the same pair.
    pub async fn write_api_blocking(&self, org: &str, bucket: &str) -> Arc<WriteApiBlocking> {
        let mut registry = self.registry.lock().await;
        let key = WriteKey::new(org, bucket);
        if let Some(write_api) = registry.write_apis_blocking.get(&key) {
            return Arc::clone(write_api);
        }
        registry.note_creation("blocking", &key);
        let write_api = Arc::new(WriteApiBlocking::new(
            org,
            bucket,
            Arc::clone(&self.http),
            self.options.write_options(),
        ));
        registry
            .write_apis_blocking
            .insert(key, Arc::clone(&write_api));
        write_api
    }

    /// A query client for `org`
    ///
    /// Unlike every other accessor this is not cached: each call returns a new instance.
    pub fn query_api(&self, org: &str) -> Arc<QueryApi> {
        Arc::new(QueryApi::new(org, Arc::clone(&self.http)))
    }

    /// The Authorizations API client
    pub async fn authorizations_api(&self) -> Arc<AuthorizationsApi> {
        let mut registry = self.registry.lock().await;
        Arc::clone(
            registry
                .authorizations
                .get_or_insert_with(|| Arc::new(AuthorizationsApi::new(Arc::clone(&self.http)))),
        )
    }

    /// The Organizations API client
    pub async fn organizations_api(&self) -> Arc<OrganizationsApi> {
        let mut registry = self.registry.lock().await;
        Arc::clone(
            registry
                .organizations
                .get_or_insert_with(|| Arc::new(OrganizationsApi::new(Arc::clone(&self.http)))),
        )
    }

    /// The Users API client
    pub async fn users_api(&self) -> Arc<UsersApi> {
        let mut registry = self.registry.lock().await;
        Arc::clone(
            registry
                .users
                .get_or_insert_with(|| Arc::new(UsersApi::new(Arc::clone(&self.http)))),
        )
    }

    /// The Delete API client
    pub async fn delete_api(&self) -> Arc<DeleteApi> {
        let mut registry = self.registry.lock().await;
        Arc::clone(
            registry
                .delete
                .get_or_insert_with(|| Arc::new(DeleteApi::new(Arc::clone(&self.http)))),
        )
    }

    /// The Buckets API client
    pub async fn buckets_api(&self) -> Arc<BucketsApi> {
        let mut registry = self.registry.lock().await;
        Arc::clone(
            registry
                .buckets
                .get_or_insert_with(|| Arc::new(BucketsApi::new(Arc::clone(&self.http)))),
        )
    }

    /// The Labels API client
    pub async fn labels_api(&self) -> Arc<LabelsApi> {
        let mut registry = self.registry.lock().await;
        Arc::clone(
            registry
                .labels
                .get_or_insert_with(|| Arc::new(LabelsApi::new(Arc::clone(&self.http)))),
        )
    }

    /// The Tasks API client
    pub async fn tasks_api(&self) -> Arc<TasksApi> {
        let mut registry = self.registry.lock().await;
        Arc::clone(
            registry
                .tasks
                .get_or_insert_with(|| Arc::new(TasksApi::new(Arc::clone(&self.http)))),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::task::JoinSet;

    use super::*;

    fn client() -> Client {
        Client::new("http://localhost:8086", "my-token").expect("create client")
    }

    #[test]
    fn write_key_display() {
        assert_eq!(WriteKey::new("org", "bucket").to_string(), "org\tbucket");
        assert_ne!(WriteKey::new("a", "bc"), WriteKey::new("ab", "c"));
    }

    #[tokio::test]
    async fn write_api_is_cached_per_org_and_bucket() {
        let client = client();

        let a = client.write_api("org", "bucket").await;
        let b = client.write_api("org", "bucket").await;
        let c = client.write_api("org", "other-bucket").await;
        let d = client.write_api("other-org", "bucket").await;

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert!(!Arc::ptr_eq(&a, &d));
        assert_eq!(client.registry.lock().await.write_apis.len(), 3);

        client.close().await;
    }

    #[tokio::test]
    async fn write_api_blocking_is_cached_independently() {
        let client = client();

        let a = client.write_api_blocking("org", "bucket").await;
        let b = client.write_api_blocking("org", "bucket").await;
        let c = client.write_api_blocking("org", "other-bucket").await;
        let _async = client.write_api("org", "bucket").await;

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));

        let registry = client.registry.lock().await;
        assert_eq!(registry.write_apis_blocking.len(), 2);
        assert_eq!(registry.write_apis.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_callers_share_one_write_api() {
        let client = Arc::new(client());

        let mut tasks = JoinSet::new();
        for _ in 0..32 {
            let client = Arc::clone(&client);
            tasks.spawn(async move { client.write_api("org", "bucket").await });
        }
        let mut instances = Vec::new();
        while let Some(write_api) = tasks.join_next().await {
            instances.push(write_api.expect("task completes"));
        }

        assert_eq!(instances.len(), 32);
        assert!(instances.iter().all(|w| Arc::ptr_eq(w, &instances[0])));
        assert_eq!(client.registry.lock().await.write_apis.len(), 1);

        client.close().await;
    }

    #[tokio::test]
    async fn singleton_sub_clients_are_cached() {
        let client = client();

        assert!(Arc::ptr_eq(
            &client.authorizations_api().await,
            &client.authorizations_api().await
        ));
        assert!(Arc::ptr_eq(
            &client.organizations_api().await,
            &client.organizations_api().await
        ));
        assert!(Arc::ptr_eq(&client.users_api().await, &client.users_api().await));
        assert!(Arc::ptr_eq(&client.delete_api().await, &client.delete_api().await));
        assert!(Arc::ptr_eq(&client.buckets_api().await, &client.buckets_api().await));
        assert!(Arc::ptr_eq(&client.labels_api().await, &client.labels_api().await));
        assert!(Arc::ptr_eq(&client.tasks_api().await, &client.tasks_api().await));
    }

    #[tokio::test]
    async fn query_api_is_not_cached() {
        let client = client();

        let a = client.query_api("org");
        let b = client.query_api("org");

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.org(), b.org());
    }
}
