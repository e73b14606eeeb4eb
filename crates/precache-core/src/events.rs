//! Worker lifecycle event types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a served response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchSource {
    Cache,
    Network,
}

/// All events emitted by an offline cache worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkerEvent {
    // Install lifecycle
    InstallStarted(InstallStartedPayload),
    AssetsCached(AssetsCachedPayload),
    InstallFailed(InstallFailedPayload),

    // Activate lifecycle
    ObsoleteCacheRemoved(ObsoleteCacheRemovedPayload),
    Activated(ActivatedPayload),

    // Fetch
    FetchServed(FetchServedPayload),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallStartedPayload {
    pub cache_name: String,
    pub asset_count: usize,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsCachedPayload {
    pub cache_name: String,
    pub asset_count: usize,
    pub cached_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallFailedPayload {
    pub cache_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObsoleteCacheRemovedPayload {
    pub cache_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivatedPayload {
    pub cache_name: String,
    pub caches_deleted: usize,
    pub deletions_failed: usize,
    pub activated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchServedPayload {
    pub url: String,
    pub source: FetchSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = WorkerEvent::FetchServed(FetchServedPayload {
            url: "/style.css".to_string(),
            source: FetchSource::Cache,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "fetch_served");
        assert_eq!(json["source"], "cache");
    }
}
