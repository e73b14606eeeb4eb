//! Offline cache worker.
//!
//! The controller behind a cache-first offline strategy: install pre-fetches
//! a fixed asset manifest into a versioned cache, activate garbage-collects
//! prior generations, and fetch serves GET requests cache-first with network
//! fallback. The host platform drives the three handlers and awaits each to
//! completion.

pub mod lifecycle;
pub mod registry;
pub mod worker;

pub use lifecycle::WorkerState;
pub use registry::{NullEventSink, NullPageRegistry};
pub use worker::{ActivationReport, FetchOutcome, OfflineWorker};
