//! Error types for precache.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Install errors
    #[error("Manifest fetch failed for {url}: {reason}")]
    ManifestFetch { url: String, reason: String },

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    // Activate errors
    #[error("Cache deletion failed for {name}: {reason}")]
    CacheDeletion { name: String, reason: String },

    // Fetch errors
    #[error("Network unavailable for {url}: {reason}")]
    NetworkUnavailable { url: String, reason: String },

    // Lifecycle errors
    #[error("Invalid worker state: expected {expected}, was {actual}")]
    InvalidState { expected: String, actual: String },

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Infrastructure errors
    #[error("Cache storage error: {0}")]
    CacheStorage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
