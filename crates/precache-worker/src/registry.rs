//! No-op implementations of the host-side ports.
//!
//! Useful for embedders that have no page routing to coordinate and for
//! tests that only care about cache behavior.

use async_trait::async_trait;
use precache_core::Result;
use precache_core::events::WorkerEvent;
use precache_core::ports::{EventSink, PageRegistry};

/// Page registry that acknowledges every signal and routes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPageRegistry;

#[async_trait]
impl PageRegistry for NullPageRegistry {
    async fn skip_waiting(&self) -> Result<()> {
        Ok(())
    }

    async fn claim(&self) -> Result<()> {
        Ok(())
    }
}

/// Event sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventSink;

#[async_trait]
impl EventSink for NullEventSink {
    async fn emit(&self, _event: WorkerEvent) -> Result<()> {
        Ok(())
    }
}
