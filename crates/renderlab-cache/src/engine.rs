//! Render engine core - directive-honoring cached rendering

use crate::config::StoreBackend;
use crate::entry::{CachedRender, RenderStats};
use crate::store::RenderStore;
use anyhow::Result;
use renderlab::CacheDirective;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

/// What the cache did for one rendered response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Directive forbade caching; generated fresh, stored nothing
    Bypass,

    /// Served a stored render
    Hit,

    /// Nothing stored; generated and stored
    Miss,

    /// Stored render had gone stale; generated and replaced it
    Regenerated,
}

impl CacheOutcome {
    /// Header form, carried on responses as `x-render-cache`
    pub fn header_value(&self) -> &'static str {
        match self {
            Self::Bypass => "BYPASS",
            Self::Hit => "HIT",
            Self::Miss => "MISS",
            Self::Regenerated => "REGENERATED",
        }
    }
}

/// Render cache engine
///
/// Pages hand it a path, a directive, and a generator closure; the engine
/// decides whether the generator runs. Regeneration happens inside the
/// request that found the entry stale - there are no background tasks.
pub struct RenderCache {
    store: Arc<dyn RenderStore>,
    stats: Arc<RwLock<RenderStats>>,
}

impl RenderCache {
    /// Create a render cache over the configured backend
    pub async fn new(backend: StoreBackend) -> Result<Self> {
        let store = Self::create_store(backend).await?;

        Ok(Self {
            store,
            stats: Arc::new(RwLock::new(RenderStats::default())),
        })
    }

    /// Create a storage backend from config
    async fn create_store(backend: StoreBackend) -> Result<Arc<dyn RenderStore>> {
        match backend {
            StoreBackend::Memory => {
                use crate::store::memory::MemoryStore;
                Ok(Arc::new(MemoryStore::new()))
            }
            StoreBackend::Filesystem { dir } => {
                use crate::store::filesystem::FilesystemStore;
                let store = FilesystemStore::new(dir).await?;
                Ok(Arc::new(store))
            }
        }
    }

    /// Render `path` under `directive`, running `generate` only when the
    /// store cannot answer.
    ///
    /// - `AlwaysFresh`: generate every time, store nothing
    /// - `CacheIndefinitely`: stored copy wins; first render is stored
    ///   without an expiry
    /// - `Revalidate`: fresh copy wins; a stale copy is regenerated now
    ///   and replaced; tags are stored for later invalidation
    ///
    /// Generator errors propagate; any previously stored render stays in
    /// place for the next request.
    pub async fn render_with<F, Fut>(
        &self,
        path: &str,
        directive: &CacheDirective,
        generate: F,
    ) -> Result<(String, CacheOutcome)>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        match directive {
            CacheDirective::AlwaysFresh => {
                let html = generate().await?;
                Ok((html, CacheOutcome::Bypass))
            }

            CacheDirective::CacheIndefinitely => {
                if let Some(entry) = self.lookup(path).await {
                    self.record(CacheOutcome::Hit).await;
                    return Ok((entry.html, CacheOutcome::Hit));
                }

                let html = generate().await?;
                self.persist(path, CachedRender::new(html.clone(), None, Vec::new()))
                    .await;
                self.record(CacheOutcome::Miss).await;
                Ok((html, CacheOutcome::Miss))
            }

            CacheDirective::Revalidate { after, tags } => {
                let outcome = match self.lookup(path).await {
                    Some(entry) if !entry.is_stale() => {
                        self.record(CacheOutcome::Hit).await;
                        return Ok((entry.html, CacheOutcome::Hit));
                    }
                    Some(_) => CacheOutcome::Regenerated,
                    None => CacheOutcome::Miss,
                };

                let html = generate().await?;
                self.persist(path, CachedRender::new(html.clone(), *after, tags.clone()))
                    .await;
                self.record(outcome).await;
                Ok((html, outcome))
            }
        }
    }

    /// Drop the stored render for one path
    pub async fn invalidate_path(&self, path: &str) -> Result<()> {
        tracing::debug!(path, "invalidating cached render");
        self.store.delete(path).await
    }

    /// Drop every stored render carrying `tag`; returns how many fell
    pub async fn invalidate_tag(&self, tag: &str) -> Result<usize> {
        let mut dropped = 0;

        for key in self.store.keys().await? {
            if let Some(entry) = self.lookup(&key).await {
                if entry.tags.iter().any(|t| t == tag) {
                    self.store.delete(&key).await?;
                    dropped += 1;
                }
            }
        }

        tracing::debug!(tag, dropped, "tag invalidation complete");
        Ok(dropped)
    }

    /// Drop every stored render and reset counters
    pub async fn clear(&self) -> Result<()> {
        self.store.clear().await?;

        let mut stats = self.stats.write().await;
        *stats = RenderStats::default();

        Ok(())
    }

    /// All stored keys
    pub async fn keys(&self) -> Result<Vec<String>> {
        self.store.keys().await
    }

    /// Counters since startup (or the last `clear`)
    pub async fn stats(&self) -> RenderStats {
        self.stats.read().await.clone()
    }

    /// Total bytes held by the backend
    pub async fn size_bytes(&self) -> Result<u64> {
        self.store.size_bytes().await
    }

    /// Name of the active backend
    pub fn backend_name(&self) -> &'static str {
        self.store.name()
    }

    /// Store lookup with read errors degraded to a miss
    async fn lookup(&self, path: &str) -> Option<CachedRender> {
        match self.store.get(path).await {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(path, error = %err, "cache read failed, treating as miss");
                None
            }
        }
    }

    /// Store write; failure downgrades to an uncached response
    async fn persist(&self, path: &str, entry: CachedRender) {
        if let Err(err) = self.store.set(path, entry).await {
            tracing::warn!(path, error = %err, "cache write failed, serving uncached");
        }
    }

    async fn record(&self, outcome: CacheOutcome) {
        let mut stats = self.stats.write().await;
        match outcome {
            CacheOutcome::Hit => stats.hits += 1,
            CacheOutcome::Miss => stats.misses += 1,
            CacheOutcome::Regenerated => stats.regenerations += 1,
            CacheOutcome::Bypass => {}
        }
    }
}

impl Clone for RenderCache {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            stats: Arc::clone(&self.stats),
        }
    }
}
