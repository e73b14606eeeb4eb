//! Worker configuration.

use crate::{Error, Result};

/// Immutable configuration for an offline cache worker.
///
/// Fixed at construction and never mutated at runtime; deploying a changed
/// manifest or asset content means deploying a new `version`, which names a
/// fresh cache generation and invalidates the old one at activation.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Prefix shared by every cache generation this worker family owns.
    pub cache_prefix: String,
    /// Version identifier naming the current cache generation.
    pub version: String,
    /// Ordered list of asset URLs fetched and stored at install time.
    pub manifest: Vec<String>,
}

impl WorkerConfig {
    /// Create a config with the default cache prefix.
    pub fn new(version: impl Into<String>, manifest: Vec<String>) -> Self {
        Self {
            cache_prefix: "precache".to_string(),
            version: version.into(),
            manifest,
        }
    }

    /// Set the cache name prefix.
    pub fn with_cache_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.cache_prefix = prefix.into();
        self
    }

    /// The name of the cache this generation owns: `{prefix}-{version}`.
    pub fn cache_name(&self) -> String {
        format!("{}-{}", self.cache_prefix, self.version)
    }

    /// Validate the record before a worker is built around it.
    pub fn validate(&self) -> Result<()> {
        if self.cache_prefix.is_empty() {
            return Err(Error::InvalidConfig("cache prefix must not be empty".into()));
        }
        if self.version.is_empty() {
            return Err(Error::InvalidConfig("version must not be empty".into()));
        }
        if self.manifest.is_empty() {
            return Err(Error::InvalidManifest("manifest must not be empty".into()));
        }
        let mut seen = std::collections::BTreeSet::new();
        for url in &self.manifest {
            if url.is_empty() {
                return Err(Error::InvalidManifest("manifest entry must not be empty".into()));
            }
            if !seen.insert(url.as_str()) {
                return Err(Error::InvalidManifest(format!("duplicate manifest entry: {}", url)));
            }
        }
        Ok(())
    }
}
