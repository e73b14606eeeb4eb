//! Integration test infrastructure for precache.
//!
//! Provides a wiremock-backed origin server standing in for the network,
//! recording implementations of the host-side ports, and fixtures for
//! building workers against in-memory or filesystem stores.
//!
//! # Usage
//!
//! ```ignore
//! use precache_tests::TestContext;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let ctx = TestContext::new().await;
//!     // Use ctx.server, ctx.store, ctx.worker(...), etc.
//! }
//! ```

pub mod context;
pub mod fixtures;
pub mod helpers;

pub use context::TestContext;
pub use fixtures::*;
pub use helpers::*;

/// Initialize test logging (call once per test binary).
pub fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,precache_tests=debug")),
        )
        .with_test_writer()
        .try_init();
}
