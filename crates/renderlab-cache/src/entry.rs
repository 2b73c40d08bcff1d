//! Cached render types and counters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One stored page render with its caching metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedRender {
    /// The rendered HTML
    pub html: String,

    /// When the render was produced
    pub generated_at: DateTime<Utc>,

    /// How long the render stays fresh; `None` means it only goes away
    /// through explicit invalidation
    pub max_age: Option<Duration>,

    /// Invalidation tags attached by the directive that produced it
    pub tags: Vec<String>,
}

impl CachedRender {
    /// Create a cached render stamped with the current time
    pub fn new(html: String, max_age: Option<Duration>, tags: Vec<String>) -> Self {
        Self {
            html,
            generated_at: Utc::now(),
            max_age,
            tags,
        }
    }

    /// Check whether the render has outlived its freshness window
    pub fn is_stale(&self) -> bool {
        match self.max_age {
            Some(max_age) => self.age() >= max_age,
            None => false,
        }
    }

    /// Get the age of the render
    pub fn age(&self) -> Duration {
        Utc::now()
            .signed_duration_since(self.generated_at)
            .to_std()
            .unwrap_or(Duration::from_secs(0))
    }

    /// Size of the rendered HTML in bytes
    pub fn size_bytes(&self) -> usize {
        self.html.len()
    }
}

/// Counters for the render cache
#[derive(Debug, Clone, Default)]
pub struct RenderStats {
    /// Fresh entries served from the store
    pub hits: u64,

    /// Renders produced because nothing was stored
    pub misses: u64,

    /// Renders produced because the stored entry had gone stale
    pub regenerations: u64,
}

impl RenderStats {
    /// Fraction of cacheable lookups answered from the store
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses + self.regenerations;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
