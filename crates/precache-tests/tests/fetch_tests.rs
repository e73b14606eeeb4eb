//! Fetch interceptor integration tests: cache-first, network fallback,
//! and method filtering.

use precache_core::Error;
use precache_core::http::{Method, Request};
use precache_tests::{TestContext, mount_asset, mount_assets};
use precache_worker::FetchOutcome;

#[tokio::test]
async fn test_cached_asset_is_served_byte_identical_without_network() {
    let ctx = TestContext::new().await;
    mount_asset(&ctx.server, "/a.html", b"install-time body", "text/html").await;

    let worker = ctx.worker("v1", &["/a.html"]);
    worker.on_install().await.unwrap();
    worker.on_activate().await.unwrap();

    // Drop every mock and the request journal: from here on, any network
    // access would show up in received_requests (and answer 404).
    ctx.server.reset().await;

    let outcome = worker.on_fetch(&Request::get("/a.html")).await.unwrap();
    match outcome {
        FetchOutcome::Cached(response) => {
            assert_eq!(response.body, b"install-time body");
            assert_eq!(response.header("content-type"), Some("text/html"));
        }
        other => panic!("expected cached outcome, got {:?}", other),
    }
    assert!(ctx.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cached_copy_survives_origin_changes() {
    let ctx = TestContext::new().await;
    mount_asset(&ctx.server, "/a.html", b"original", "text/html").await;

    let worker = ctx.worker("v1", &["/a.html"]);
    worker.on_install().await.unwrap();

    // The origin changes; the cache does not
    ctx.server.reset().await;
    mount_asset(&ctx.server, "/a.html", b"changed on origin", "text/html").await;

    let outcome = worker.on_fetch(&Request::get("/a.html")).await.unwrap();
    match outcome {
        FetchOutcome::Cached(response) => assert_eq!(response.body, b"original"),
        other => panic!("expected cached outcome, got {:?}", other),
    }
}

#[tokio::test]
async fn test_uncached_get_goes_to_network_every_time() {
    let ctx = TestContext::new().await;
    mount_assets(&ctx.server, &[("/a.html", b"a"), ("/api/data", b"fresh data")]).await;

    let worker = ctx.worker("v1", &["/a.html"]);
    worker.on_install().await.unwrap();
    worker.on_activate().await.unwrap();
    ctx.server.reset().await;
    mount_assets(&ctx.server, &[("/api/data", b"fresh data")]).await;

    for _ in 0..2 {
        let outcome = worker.on_fetch(&Request::get("/api/data")).await.unwrap();
        match outcome {
            FetchOutcome::Network(response) => assert_eq!(response.body, b"fresh data"),
            other => panic!("expected network outcome, got {:?}", other),
        }
    }

    // Two requests, two origin hits: the response was never cached
    assert_eq!(ctx.server.received_requests().await.unwrap().len(), 2);
    assert_eq!(ctx.store.entry_count("precache-v1").await.unwrap(), 1);
}

#[tokio::test]
async fn test_post_to_a_cached_url_is_passed_through() {
    let ctx = TestContext::new().await;
    mount_assets(&ctx.server, &[("/a.html", b"a")]).await;

    let worker = ctx.worker("v1", &["/a.html"]);
    worker.on_install().await.unwrap();
    ctx.server.reset().await;

    let post = Request::new(Method::Post, "/a.html");
    let outcome = worker.on_fetch(&post).await.unwrap();
    assert_eq!(outcome, FetchOutcome::Passthrough);

    // The worker made no network call of its own
    assert!(ctx.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_network_failure_without_a_cached_match_propagates() {
    let ctx = TestContext::new().await;
    mount_assets(&ctx.server, &[("/a.html", b"a")]).await;

    let worker = ctx.worker("v1", &["/a.html"]);
    worker.on_install().await.unwrap();

    // Nothing cached for this URL and the host is unreachable
    let err = worker
        .on_fetch(&Request::get("http://127.0.0.1:1/missing.txt"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NetworkUnavailable { .. }));
}

#[tokio::test]
async fn test_query_strings_distinguish_cache_entries() {
    let ctx = TestContext::new().await;
    mount_asset(&ctx.server, "/page", b"plain", "text/html").await;

    let worker = ctx.worker("v1", &["/page"]);
    worker.on_install().await.unwrap();

    // Same path with a query string is a different request
    let outcome = worker.on_fetch(&Request::get("/page?tab=2")).await.unwrap();
    assert!(matches!(outcome, FetchOutcome::Network(_)));

    let outcome = worker.on_fetch(&Request::get("/page")).await.unwrap();
    assert!(matches!(outcome, FetchOutcome::Cached(_)));
}
