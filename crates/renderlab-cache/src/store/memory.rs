//! In-memory storage backend for the render cache

use crate::entry::CachedRender;
use crate::store::RenderStore;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory storage backend
///
/// Stores cached renders in a HashMap.
/// Fast but non-persistent - the cache is lost on restart.
#[derive(Clone)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, CachedRender>>>,
}

impl MemoryStore {
    /// Create a new memory storage backend
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get cache size (number of entries)
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RenderStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<CachedRender>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, entry: CachedRender) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.clear();
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let entries = self.entries.read().await;
        Ok(entries.keys().cloned().collect())
    }

    async fn size_bytes(&self) -> Result<u64> {
        let entries = self.entries.read().await;
        Ok(entries.values().map(|entry| entry.size_bytes() as u64).sum())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
