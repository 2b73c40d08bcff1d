//! Storage backends for the render cache

use crate::entry::CachedRender;
use anyhow::Result;
use async_trait::async_trait;

pub mod filesystem;
pub mod memory;

/// Trait for render-cache storage backends
#[async_trait]
pub trait RenderStore: Send + Sync {
    /// Get a cached render by key
    async fn get(&self, key: &str) -> Result<Option<CachedRender>>;

    /// Store a cached render
    async fn set(&self, key: &str, entry: CachedRender) -> Result<()>;

    /// Delete a cached render
    async fn delete(&self, key: &str) -> Result<()>;

    /// Drop every stored render
    async fn clear(&self) -> Result<()>;

    /// Get all stored keys (storage form; the filesystem backend returns
    /// sanitized names that round-trip through `get`/`delete`)
    async fn keys(&self) -> Result<Vec<String>>;

    /// Total bytes held by this backend
    async fn size_bytes(&self) -> Result<u64>;

    /// Get storage backend name
    fn name(&self) -> &'static str;
}
