//! Port traits (hexagonal architecture).
//!
//! These traits define the interfaces between the worker and the host
//! platform: the persistent cache store, the network transport, and the
//! page registry behind the skip-waiting/claim signals.

use crate::events::WorkerEvent;
use crate::http::{Request, Response};
use crate::Result;
use async_trait::async_trait;

/// Persistent, origin-scoped store of named caches.
///
/// Each cache maps a request key to a stored response. Individual operations
/// are atomic; there is no cross-operation transaction.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Commit a set of request/response pairs under `cache_name` in one
    /// bulk operation: either every entry lands or none does. Creates the
    /// cache if absent, replaces its contents if present.
    async fn put_all(&self, cache_name: &str, entries: Vec<(Request, Response)>) -> Result<()>;

    /// Look up a request across every cache in the store.
    async fn match_any(&self, request: &Request) -> Result<Option<Response>>;

    /// Look up a request in a single named cache.
    async fn match_in(&self, cache_name: &str, request: &Request) -> Result<Option<Response>>;

    /// List all cache names.
    async fn list_names(&self) -> Result<Vec<String>>;

    /// Delete a whole cache. Returns `false` if no cache had that name.
    async fn delete(&self, cache_name: &str) -> Result<bool>;

    /// Whether a cache with this name exists.
    async fn has(&self, cache_name: &str) -> Result<bool>;

    /// Number of entries stored under a cache name (zero if absent).
    async fn entry_count(&self, cache_name: &str) -> Result<usize>;
}

/// Network transport for manifest installs and fallback fetches.
#[async_trait]
pub trait Network: Send + Sync {
    /// Perform the request and return the response as received.
    ///
    /// A non-2xx status is a valid response, not an error; only transport
    /// failures (unreachable host, DNS, timeout) produce `Err`.
    async fn fetch(&self, request: &Request) -> Result<Response>;
}

/// Host-side registry of the pages this worker controls.
#[async_trait]
pub trait PageRegistry: Send + Sync {
    /// Ask the host to activate this worker without waiting for old pages
    /// to close.
    async fn skip_waiting(&self) -> Result<()>;

    /// Ask the host to route all open pages through this worker immediately.
    async fn claim(&self) -> Result<()>;
}

/// Observer for worker lifecycle events.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Deliver one event.
    async fn emit(&self, event: WorkerEvent) -> Result<()>;
}
