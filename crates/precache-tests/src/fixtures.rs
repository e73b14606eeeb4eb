//! Fixtures for mounting origin assets and building configurations.

use precache_core::config::WorkerConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mount a single GET asset on the origin server.
pub async fn mount_asset(server: &MockServer, url_path: &str, body: &[u8], content_type: &str) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", content_type)
                .set_body_bytes(body.to_vec()),
        )
        .mount(server)
        .await;
}

/// Mount a set of plain-text GET assets.
pub async fn mount_assets(server: &MockServer, assets: &[(&str, &[u8])]) {
    for (url_path, body) in assets {
        mount_asset(server, url_path, body, "text/plain").await;
    }
}

/// Mount an asset that always answers with the given error status.
pub async fn mount_failing_asset(server: &MockServer, url_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Build a manifest from path strings.
pub fn manifest(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

/// Build a worker config for a version and manifest.
pub fn config(version: &str, paths: &[&str]) -> WorkerConfig {
    WorkerConfig::new(version, manifest(paths))
}
