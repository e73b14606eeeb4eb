//! Test context wiring a worker to a wiremock origin.

use crate::helpers::RecordingRegistry;
use precache_core::ports::CacheStore;
use precache_net::{HttpNetwork, NetConfig};
use precache_store::MemoryStore;
use precache_worker::OfflineWorker;
use std::sync::Arc;
use wiremock::MockServer;

/// Test context with a running origin server and a shared cache store.
///
/// Relative manifest URLs resolve against the origin server, so tests can
/// use the same `/a.html`-style paths the deployed controller would.
pub struct TestContext {
    pub server: MockServer,
    pub store: Arc<dyn CacheStore>,
    pub pages: Arc<RecordingRegistry>,
}

impl TestContext {
    /// Create a context backed by an in-memory store.
    pub async fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new())).await
    }

    /// Create a context around an existing store implementation.
    pub async fn with_store(store: Arc<dyn CacheStore>) -> Self {
        crate::init_test_logging();
        let server = MockServer::start().await;
        Self {
            server,
            store,
            pages: Arc::new(RecordingRegistry::new()),
        }
    }

    /// Network adapter resolving relative URLs against the origin server.
    pub fn network(&self) -> Arc<HttpNetwork> {
        let config = NetConfig::default().with_base_url(self.server.uri());
        Arc::new(HttpNetwork::with_config(config).expect("Failed to build HTTP client"))
    }

    /// Build a worker for a version and manifest on the shared store.
    pub fn worker(&self, version: &str, paths: &[&str]) -> OfflineWorker {
        OfflineWorker::new(
            crate::fixtures::config(version, paths),
            Arc::clone(&self.store),
            self.network(),
            Arc::clone(&self.pages) as Arc<dyn precache_core::ports::PageRegistry>,
        )
        .expect("Failed to build worker")
    }
}
