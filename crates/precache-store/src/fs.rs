//! Filesystem-backed cache store.
//!
//! Layout: one directory per cache under the root, holding a `meta.json`
//! with the original cache name and an `entries/` directory with one JSON
//! file per stored pair (file stem = SHA-256 of the request key).
//!
//! `put_all` stages the whole cache in a sibling `.staging` directory and
//! commits it with a rename, so a failed install never leaves a partial
//! cache behind. Replacing an existing cache removes it before the rename;
//! a reader in that window sees a missing cache, never a partial one.

use crate::entry::StoredEntry;
use crate::keys::{entry_file_stem, request_key, sanitize_name};
use async_trait::async_trait;
use precache_core::http::{Request, Response};
use precache_core::ports::CacheStore;
use precache_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const META_FILE: &str = "meta.json";
const ENTRIES_DIR: &str = "entries";
const STAGING_SUFFIX: &str = ".staging";

#[derive(Debug, Serialize, Deserialize)]
struct CacheMeta {
    name: String,
}

/// Filesystem `CacheStore` implementation.
pub struct FilesystemStore {
    root_dir: PathBuf,
}

impl FilesystemStore {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    fn cache_dir(&self, cache_name: &str) -> PathBuf {
        self.root_dir.join(sanitize_name(cache_name))
    }

    fn entry_path(cache_dir: &Path, request: &Request) -> PathBuf {
        let stem = entry_file_stem(&request_key(request));
        cache_dir.join(ENTRIES_DIR).join(format!("{}.json", stem))
    }

    async fn read_meta(dir: &Path) -> Option<CacheMeta> {
        let bytes = tokio::fs::read(dir.join(META_FILE)).await.ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    async fn read_entry(path: &Path) -> Result<Option<StoredEntry>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::CacheStorage(format!(
                "Failed to read cache entry {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Directories of committed caches, sorted by directory name.
    async fn cache_dirs(&self) -> Result<Vec<PathBuf>> {
        if !self.root_dir.exists() {
            return Ok(vec![]);
        }

        let mut dirs = vec![];
        let mut read_dir = tokio::fs::read_dir(&self.root_dir)
            .await
            .map_err(|e| Error::CacheStorage(format!("Failed to read cache root: {}", e)))?;

        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| Error::CacheStorage(format!("Failed to read cache root entry: {}", e)))?
        {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.ends_with(STAGING_SUFFIX) {
                continue;
            }
            let path = entry.path();
            if path.is_dir() && path.join(META_FILE).exists() {
                dirs.push(path);
            }
        }

        dirs.sort();
        Ok(dirs)
    }
}

#[async_trait]
impl CacheStore for FilesystemStore {
    async fn put_all(&self, cache_name: &str, entries: Vec<(Request, Response)>) -> Result<()> {
        let final_dir = self.cache_dir(cache_name);
        let staging_dir = self
            .root_dir
            .join(format!("{}{}", sanitize_name(cache_name), STAGING_SUFFIX));

        // An interrupted commit may have left staging behind
        if staging_dir.exists() {
            tokio::fs::remove_dir_all(&staging_dir)
                .await
                .map_err(|e| Error::CacheStorage(format!("Failed to clear staging: {}", e)))?;
        }

        let entries_dir = staging_dir.join(ENTRIES_DIR);
        tokio::fs::create_dir_all(&entries_dir)
            .await
            .map_err(|e| Error::CacheStorage(format!("Failed to create cache dir: {}", e)))?;

        let meta = CacheMeta {
            name: cache_name.to_string(),
        };
        tokio::fs::write(staging_dir.join(META_FILE), serde_json::to_vec(&meta)?)
            .await
            .map_err(|e| Error::CacheStorage(format!("Failed to write cache meta: {}", e)))?;

        for (request, response) in entries {
            let stem = entry_file_stem(&request_key(&request));
            let stored = StoredEntry::new(request, response);
            tokio::fs::write(
                entries_dir.join(format!("{}.json", stem)),
                serde_json::to_vec(&stored)?,
            )
            .await
            .map_err(|e| Error::CacheStorage(format!("Failed to write cache entry: {}", e)))?;
        }

        if final_dir.exists() {
            tokio::fs::remove_dir_all(&final_dir)
                .await
                .map_err(|e| Error::CacheStorage(format!("Failed to replace cache: {}", e)))?;
        }
        tokio::fs::rename(&staging_dir, &final_dir)
            .await
            .map_err(|e| Error::CacheStorage(format!("Failed to commit cache: {}", e)))?;

        debug!(cache = %cache_name, "Committed cache to disk");
        Ok(())
    }

    async fn match_any(&self, request: &Request) -> Result<Option<Response>> {
        for dir in self.cache_dirs().await? {
            let path = Self::entry_path(&dir, request);
            if let Some(entry) = Self::read_entry(&path).await? {
                return Ok(Some(entry.response));
            }
        }
        Ok(None)
    }

    async fn match_in(&self, cache_name: &str, request: &Request) -> Result<Option<Response>> {
        let path = Self::entry_path(&self.cache_dir(cache_name), request);
        Ok(Self::read_entry(&path).await?.map(|entry| entry.response))
    }

    async fn list_names(&self) -> Result<Vec<String>> {
        let mut names = vec![];
        for dir in self.cache_dirs().await? {
            if let Some(meta) = Self::read_meta(&dir).await {
                names.push(meta.name);
            }
        }
        Ok(names)
    }

    async fn delete(&self, cache_name: &str) -> Result<bool> {
        let dir = self.cache_dir(cache_name);
        if !dir.exists() {
            return Ok(false);
        }
        tokio::fs::remove_dir_all(&dir)
            .await
            .map_err(|e| Error::CacheStorage(format!("Failed to delete cache: {}", e)))?;
        Ok(true)
    }

    async fn has(&self, cache_name: &str) -> Result<bool> {
        Ok(self.cache_dir(cache_name).join(META_FILE).exists())
    }

    async fn entry_count(&self, cache_name: &str) -> Result<usize> {
        let entries_dir = self.cache_dir(cache_name).join(ENTRIES_DIR);
        if !entries_dir.exists() {
            return Ok(0);
        }

        let mut count = 0;
        let mut read_dir = tokio::fs::read_dir(&entries_dir)
            .await
            .map_err(|e| Error::CacheStorage(format!("Failed to read cache entries: {}", e)))?;
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| Error::CacheStorage(format!("Failed to read cache entries: {}", e)))?
        {
            if entry.path().extension().is_some_and(|ext| ext == "json") {
                count += 1;
            }
        }
        Ok(count)
    }
}
