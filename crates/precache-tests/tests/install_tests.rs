//! Install handler integration tests against a real HTTP origin.

use precache_core::Error;
use precache_core::events::WorkerEvent;
use precache_tests::{TestContext, mount_assets, mount_failing_asset};
use precache_worker::WorkerState;
use std::sync::Arc;

#[tokio::test]
async fn test_install_populates_versioned_cache() {
    let ctx = TestContext::new().await;
    mount_assets(&ctx.server, &[("/a.html", b"<html>a</html>"), ("/b.js", b"let b = 1;")]).await;

    let worker = ctx.worker("v1", &["/a.html", "/b.js"]);
    worker.on_install().await.expect("Install failed");

    assert_eq!(worker.state().await, WorkerState::Installed);
    assert!(ctx.store.has("precache-v1").await.unwrap());
    assert_eq!(ctx.store.entry_count("precache-v1").await.unwrap(), 2);
    assert_eq!(ctx.pages.skip_waiting_count(), 1);
}

#[tokio::test]
async fn test_install_is_atomic_when_an_asset_is_missing() {
    let ctx = TestContext::new().await;
    // /b.js is never mounted, so the origin answers 404
    mount_assets(&ctx.server, &[("/a.html", b"a")]).await;

    let worker = ctx.worker("v1", &["/a.html", "/b.js"]);
    let err = worker.on_install().await.unwrap_err();
    assert!(matches!(err, Error::ManifestFetch { .. }));

    // No partial cache was committed and the generation never installed
    assert!(!ctx.store.has("precache-v1").await.unwrap());
    assert_eq!(ctx.store.entry_count("precache-v1").await.unwrap(), 0);
    assert_eq!(ctx.pages.skip_waiting_count(), 0);
    assert_eq!(worker.state().await, WorkerState::Parsed);
}

#[tokio::test]
async fn test_install_is_atomic_on_server_error() {
    let ctx = TestContext::new().await;
    mount_assets(&ctx.server, &[("/a.html", b"a"), ("/b.js", b"b")]).await;
    mount_failing_asset(&ctx.server, "/broken.css", 500).await;

    let worker = ctx.worker("v1", &["/a.html", "/b.js", "/broken.css"]);
    let err = worker.on_install().await.unwrap_err();
    match err {
        Error::ManifestFetch { url, reason } => {
            assert_eq!(url, "/broken.css");
            assert!(reason.contains("500"), "unexpected reason: {}", reason);
        }
        other => panic!("expected ManifestFetch, got {:?}", other),
    }
    assert!(!ctx.store.has("precache-v1").await.unwrap());
}

#[tokio::test]
async fn test_install_emits_lifecycle_events() {
    let ctx = TestContext::new().await;
    mount_assets(&ctx.server, &[("/a.html", b"a")]).await;

    let sink = Arc::new(precache_tests::RecordingEventSink::new());
    let worker = ctx.worker("v1", &["/a.html"]).with_event_sink(sink.clone());
    worker.on_install().await.unwrap();

    let events = sink.events();
    assert!(matches!(events[0], WorkerEvent::InstallStarted(_)));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, WorkerEvent::AssetsCached(p) if p.asset_count == 1))
    );
}
