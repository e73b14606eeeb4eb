//! Full version-upgrade scenario on a persistent store: v1 installs and
//! activates, v2 ships a larger manifest, installs alongside v1, then
//! activates and sweeps v1 away.

use precache_core::http::Request;
use precache_store::FilesystemStore;
use precache_tests::{TestContext, mount_asset, mount_assets};
use precache_worker::FetchOutcome;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_version_upgrade_replaces_cache_generation() {
    let tmp = TempDir::new().unwrap();
    let store = Arc::new(FilesystemStore::new(tmp.path()));
    let ctx = TestContext::with_store(store).await;

    // v1 ships two assets
    mount_assets(&ctx.server, &[("/a.html", b"a v1"), ("/b.js", b"b v1")]).await;
    let v1 = ctx.worker("v1", &["/a.html", "/b.js"]);
    v1.on_install().await.unwrap();
    v1.on_activate().await.unwrap();
    assert_eq!(ctx.store.entry_count("precache-v1").await.unwrap(), 2);

    // v2 ships updated content plus one new asset
    ctx.server.reset().await;
    mount_assets(
        &ctx.server,
        &[("/a.html", b"a v2"), ("/b.js", b"b v2"), ("/c.png", b"c v2")],
    )
    .await;
    let v2 = ctx.worker("v2", &["/a.html", "/b.js", "/c.png"]);
    v2.on_install().await.unwrap();

    // Both generations coexist until v2 activates
    let mut names = ctx.store.list_names().await.unwrap();
    names.sort();
    assert_eq!(names, vec!["precache-v1", "precache-v2"]);
    assert_eq!(ctx.store.entry_count("precache-v2").await.unwrap(), 3);

    let report = v2.on_activate().await.unwrap();
    v1.retire().await;
    assert_eq!(report.deleted, vec!["precache-v1"]);
    assert_eq!(ctx.store.list_names().await.unwrap(), vec!["precache-v2"]);

    // /a.html is now the v2-stored copy
    let outcome = v2.on_fetch(&Request::get("/a.html")).await.unwrap();
    match outcome {
        FetchOutcome::Cached(response) => assert_eq!(response.body, b"a v2"),
        other => panic!("expected cached outcome, got {:?}", other),
    }

    // An unknown URL goes to the network and its result is discarded
    let outcome = v2.on_fetch(&Request::get("/missing.txt")).await.unwrap();
    match outcome {
        FetchOutcome::Network(response) => assert_eq!(response.status, 404),
        other => panic!("expected network outcome, got {:?}", other),
    }
    assert_eq!(ctx.store.entry_count("precache-v2").await.unwrap(), 3);
}

#[tokio::test]
async fn test_cache_survives_a_new_store_handle() {
    let tmp = TempDir::new().unwrap();
    {
        let store = Arc::new(FilesystemStore::new(tmp.path()));
        let ctx = TestContext::with_store(store).await;
        mount_asset(&ctx.server, "/a.html", b"persistent", "text/html").await;
        let worker = ctx.worker("v1", &["/a.html"]);
        worker.on_install().await.unwrap();
        worker.on_activate().await.unwrap();
    }

    // A fresh handle over the same directory still serves the cached copy,
    // even with the origin gone
    let store = Arc::new(FilesystemStore::new(tmp.path()));
    let ctx = TestContext::with_store(store).await;
    let worker = ctx.worker("v1", &["/a.html"]);
    let outcome = worker.on_fetch(&Request::get("/a.html")).await.unwrap();
    match outcome {
        FetchOutcome::Cached(response) => assert_eq!(response.body, b"persistent"),
        other => panic!("expected cached outcome, got {:?}", other),
    }
}
