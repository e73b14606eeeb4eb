//! Test helper implementations of the host-side ports.

use async_trait::async_trait;
use precache_core::Result;
use precache_core::events::WorkerEvent;
use precache_core::http::{Request, Response};
use precache_core::ports::{CacheStore, EventSink, PageRegistry};
use precache_store::MemoryStore;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Page registry that records how often each host signal was sent.
#[derive(Debug, Default)]
pub struct RecordingRegistry {
    skip_waiting_calls: AtomicUsize,
    claim_calls: AtomicUsize,
}

impl RecordingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_waiting_count(&self) -> usize {
        self.skip_waiting_calls.load(Ordering::SeqCst)
    }

    pub fn claim_count(&self) -> usize {
        self.claim_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageRegistry for RecordingRegistry {
    async fn skip_waiting(&self) -> Result<()> {
        self.skip_waiting_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn claim(&self) -> Result<()> {
        self.claim_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Event sink that keeps every emitted event for later assertions.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<WorkerEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<WorkerEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSink for RecordingEventSink {
    async fn emit(&self, event: WorkerEvent) -> Result<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Store wrapper that refuses to delete the named caches, for exercising
/// deletion-failure isolation during activation.
pub struct FailingDeleteStore {
    inner: MemoryStore,
    refuse: Vec<String>,
}

impl FailingDeleteStore {
    pub fn new(refuse: Vec<String>) -> Self {
        Self {
            inner: MemoryStore::new(),
            refuse,
        }
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

#[async_trait]
impl CacheStore for FailingDeleteStore {
    async fn put_all(&self, name: &str, entries: Vec<(Request, Response)>) -> Result<()> {
        self.inner.put_all(name, entries).await
    }

    async fn match_any(&self, request: &Request) -> Result<Option<Response>> {
        self.inner.match_any(request).await
    }

    async fn match_in(&self, name: &str, request: &Request) -> Result<Option<Response>> {
        self.inner.match_in(name, request).await
    }

    async fn list_names(&self) -> Result<Vec<String>> {
        self.inner.list_names().await
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        if self.refuse.iter().any(|r| r == name) {
            return Err(precache_core::Error::CacheStorage(format!(
                "refusing to delete {}",
                name
            )));
        }
        self.inner.delete(name).await
    }

    async fn has(&self, name: &str) -> Result<bool> {
        self.inner.has(name).await
    }

    async fn entry_count(&self, name: &str) -> Result<usize> {
        self.inner.entry_count(name).await
    }
}
