//! Filesystem storage backend for the render cache

use crate::entry::CachedRender;
use crate::store::RenderStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use walkdir::WalkDir;

/// Filesystem storage backend
///
/// Stores cached renders as JSON files on disk.
/// Persistent across restarts, suitable for single-instance deployments -
/// a statically generated page survives a server restart.
#[derive(Clone)]
pub struct FilesystemStore {
    dir: PathBuf,
}

impl FilesystemStore {
    /// Create a new filesystem storage backend
    pub async fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .await
            .context("Failed to create cache directory")?;

        Ok(Self { dir })
    }

    /// Get the file path for a cache key
    fn key_to_path(&self, key: &str) -> PathBuf {
        // Sanitize key to make it filesystem-safe
        let safe_key = key.replace(['/', '\\', ':'], "_");

        self.dir.join(format!("{}.json", safe_key))
    }
}

#[async_trait]
impl RenderStore for FilesystemStore {
    async fn get(&self, key: &str) -> Result<Option<CachedRender>> {
        let path = self.key_to_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .context("Failed to read cache file")?;

        let entry: CachedRender =
            serde_json::from_str(&content).context("Failed to deserialize cached render")?;

        Ok(Some(entry))
    }

    async fn set(&self, key: &str, entry: CachedRender) -> Result<()> {
        let path = self.key_to_path(key);

        let json = serde_json::to_string_pretty(&entry).context("Failed to serialize render")?;

        fs::write(&path, json)
            .await
            .context("Failed to write cache file")?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.key_to_path(key);

        if path.exists() {
            fs::remove_file(&path)
                .await
                .context("Failed to delete cache file")?;
        }

        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut entries = fs::read_dir(&self.dir)
            .await
            .context("Failed to read cache directory")?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();

            if path.is_file() {
                fs::remove_file(&path).await.ok();
            }
        }

        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut entries = fs::read_dir(&self.dir)
            .await
            .context("Failed to read cache directory")?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();

            if path.is_file() {
                if let Some(file_stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    keys.push(file_stem.to_string());
                }
            }
        }

        Ok(keys)
    }

    async fn size_bytes(&self) -> Result<u64> {
        let mut total = 0u64;

        for entry in WalkDir::new(&self.dir).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file() {
                if let Ok(metadata) = entry.metadata() {
                    total += metadata.len();
                }
            }
        }

        Ok(total)
    }

    fn name(&self) -> &'static str {
        "filesystem"
    }
}
