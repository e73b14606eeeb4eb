//! The offline cache worker and its three handlers.

use crate::lifecycle::WorkerState;
use crate::registry::NullEventSink;
use chrono::Utc;
use futures::future;
use precache_core::config::WorkerConfig;
use precache_core::events::{
    ActivatedPayload, AssetsCachedPayload, FetchServedPayload, FetchSource, InstallFailedPayload,
    InstallStartedPayload, ObsoleteCacheRemovedPayload, WorkerEvent,
};
use precache_core::http::{Method, Request, Response};
use precache_core::ports::{CacheStore, EventSink, Network, PageRegistry};
use precache_core::{Error, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Result of a fetch interception.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Served from the cache; no network access was made.
    Cached(Response),
    /// Fetched from the network on a cache miss; not stored.
    Network(Response),
    /// The worker declines to respond; the host applies its default
    /// network behavior.
    Passthrough,
}

/// Outcome of the obsolete-cache sweep during activation.
#[derive(Debug, Default)]
pub struct ActivationReport {
    /// Caches removed by this activation.
    pub deleted: Vec<String>,
    /// Deletions that failed, as `Error::CacheDeletion`. Failures are
    /// isolated: they never block other deletions or activation itself.
    pub failed: Vec<Error>,
}

/// The offline cache controller.
///
/// One instance per deployed generation. The host drives the lifecycle:
/// `on_install` exactly once, `on_activate` after install succeeds and the
/// previous generation (if any) has released control, and `on_fetch` for
/// every request from controlled pages.
pub struct OfflineWorker {
    config: WorkerConfig,
    store: Arc<dyn CacheStore>,
    network: Arc<dyn Network>,
    pages: Arc<dyn PageRegistry>,
    events: Arc<dyn EventSink>,
    state: RwLock<WorkerState>,
}

impl OfflineWorker {
    /// Build a worker around a validated configuration.
    pub fn new(
        config: WorkerConfig,
        store: Arc<dyn CacheStore>,
        network: Arc<dyn Network>,
        pages: Arc<dyn PageRegistry>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            store,
            network,
            pages,
            events: Arc::new(NullEventSink),
            state: RwLock::new(WorkerState::Parsed),
        })
    }

    /// Attach an event sink. Delivery is best-effort: a failing sink is
    /// logged and never fails a handler.
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// The cache name owned by this generation.
    pub fn cache_name(&self) -> String {
        self.config.cache_name()
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    pub async fn state(&self) -> WorkerState {
        *self.state.read().await
    }

    /// Mark this worker as replaced by a newer generation.
    pub async fn retire(&self) {
        self.set_state(WorkerState::Redundant).await;
    }

    /// Install handler: fetch every manifest asset and commit them to the
    /// versioned cache in one bulk operation, then ask the host to skip
    /// the waiting phase.
    ///
    /// All-or-nothing: any fetch failure (transport error or non-2xx)
    /// aborts the install and nothing is written to the store.
    pub async fn on_install(&self) -> Result<()> {
        self.enter(WorkerState::Parsed, WorkerState::Installing).await?;

        let cache_name = self.config.cache_name();
        info!(
            cache = %cache_name,
            assets = self.config.manifest.len(),
            "Installing offline cache"
        );
        self.emit(WorkerEvent::InstallStarted(InstallStartedPayload {
            cache_name: cache_name.clone(),
            asset_count: self.config.manifest.len(),
            started_at: Utc::now(),
        }))
        .await;

        let fetches = self.config.manifest.iter().map(|url| self.fetch_asset(url));
        let entries = match future::try_join_all(fetches).await {
            Ok(entries) => entries,
            Err(err) => {
                self.fail_install(&cache_name, &err).await;
                return Err(err);
            }
        };

        if let Err(err) = self.store.put_all(&cache_name, entries).await {
            self.fail_install(&cache_name, &err).await;
            return Err(err);
        }

        self.set_state(WorkerState::Installed).await;
        info!(cache = %cache_name, "All core assets cached");
        self.emit(WorkerEvent::AssetsCached(AssetsCachedPayload {
            cache_name: cache_name.clone(),
            asset_count: self.config.manifest.len(),
            cached_at: Utc::now(),
        }))
        .await;

        self.pages.skip_waiting().await?;
        Ok(())
    }

    /// Activate handler: delete every cache whose name is not the current
    /// one, then take control of open pages.
    ///
    /// Deletions run concurrently and settle independently; a failed
    /// deletion is reported and logged but never blocks activation.
    pub async fn on_activate(&self) -> Result<ActivationReport> {
        self.enter(WorkerState::Installed, WorkerState::Activating).await?;

        let current = self.config.cache_name();
        info!(cache = %current, "Activating offline cache worker");

        let names = match self.store.list_names().await {
            Ok(names) => names,
            Err(err) => {
                self.set_state(WorkerState::Installed).await;
                return Err(err);
            }
        };

        let obsolete: Vec<String> = names.into_iter().filter(|name| *name != current).collect();
        let attempts = obsolete.into_iter().map(|name| {
            let store = Arc::clone(&self.store);
            async move {
                let result = store.delete(&name).await;
                (name, result)
            }
        });

        let mut report = ActivationReport::default();
        for (name, result) in future::join_all(attempts).await {
            match result {
                Ok(true) => {
                    info!(cache = %name, "Deleted obsolete cache");
                    self.emit(WorkerEvent::ObsoleteCacheRemoved(ObsoleteCacheRemovedPayload {
                        cache_name: name.clone(),
                    }))
                    .await;
                    report.deleted.push(name);
                }
                Ok(false) => debug!(cache = %name, "Obsolete cache already gone"),
                Err(err) => {
                    warn!(cache = %name, error = %err, "Failed to delete obsolete cache");
                    report.failed.push(Error::CacheDeletion {
                        name,
                        reason: err.to_string(),
                    });
                }
            }
        }

        self.pages.claim().await?;
        self.set_state(WorkerState::Activated).await;
        info!(
            cache = %current,
            deleted = report.deleted.len(),
            failed = report.failed.len(),
            "Worker activated and controlling pages"
        );
        self.emit(WorkerEvent::Activated(ActivatedPayload {
            cache_name: current,
            caches_deleted: report.deleted.len(),
            deletions_failed: report.failed.len(),
            activated_at: Utc::now(),
        }))
        .await;

        Ok(report)
    }

    /// Fetch handler: cache-first for GET requests, passthrough for
    /// everything else.
    ///
    /// A miss goes to the network and the response is returned without
    /// being stored; a transport failure on the fallback propagates to the
    /// requesting page.
    pub async fn on_fetch(&self, request: &Request) -> Result<FetchOutcome> {
        if request.method != Method::Get {
            return Ok(FetchOutcome::Passthrough);
        }

        if let Some(response) = self.store.match_any(request).await? {
            debug!(url = %request.url, "Serving from cache");
            self.emit(WorkerEvent::FetchServed(FetchServedPayload {
                url: request.url.clone(),
                source: FetchSource::Cache,
            }))
            .await;
            return Ok(FetchOutcome::Cached(response));
        }

        debug!(url = %request.url, "Cache miss, fetching from network");
        let response = self.network.fetch(request).await?;
        self.emit(WorkerEvent::FetchServed(FetchServedPayload {
            url: request.url.clone(),
            source: FetchSource::Network,
        }))
        .await;
        Ok(FetchOutcome::Network(response))
    }

    /// Fetch one manifest asset; non-2xx counts as failure at install time.
    async fn fetch_asset(&self, url: &str) -> Result<(Request, Response)> {
        let request = Request::get(url);
        let response =
            self.network
                .fetch(&request)
                .await
                .map_err(|err| Error::ManifestFetch {
                    url: url.to_string(),
                    reason: err.to_string(),
                })?;
        if !response.is_success() {
            return Err(Error::ManifestFetch {
                url: url.to_string(),
                reason: format!("status {}", response.status),
            });
        }
        Ok((request, response))
    }

    async fn fail_install(&self, cache_name: &str, err: &Error) {
        self.set_state(WorkerState::Parsed).await;
        warn!(cache = %cache_name, error = %err, "Install failed; no cache committed");
        self.emit(WorkerEvent::InstallFailed(InstallFailedPayload {
            cache_name: cache_name.to_string(),
            reason: err.to_string(),
        }))
        .await;
    }

    /// Gate a handler on its expected entry state and move to the running
    /// state in one step.
    async fn enter(&self, expected: WorkerState, next: WorkerState) -> Result<()> {
        let mut state = self.state.write().await;
        let current = *state;
        if current != expected {
            return Err(Error::InvalidState {
                expected: expected.to_string(),
                actual: current.to_string(),
            });
        }
        debug!(from = %current, to = %next, "Worker state transition");
        *state = next;
        Ok(())
    }

    async fn set_state(&self, next: WorkerState) {
        let mut state = self.state.write().await;
        let current = *state;
        debug_assert!(
            current.can_transition_to(next),
            "illegal worker transition: {} -> {}",
            current,
            next
        );
        debug!(from = %current, to = %next, "Worker state transition");
        *state = next;
    }

    async fn emit(&self, event: WorkerEvent) {
        if let Err(err) = self.events.emit(event).await {
            debug!(error = %err, "Event sink rejected event");
        }
    }
}
