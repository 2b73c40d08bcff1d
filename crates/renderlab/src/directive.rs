// File: src/directive.rs
// Purpose: Caller-supplied caching intent, forwarded to whatever layer
// actually caches the annotated request or render

use std::time::Duration;

/// One year in seconds, the conventional "effectively forever" max-age.
const INDEFINITE_MAX_AGE_SECS: u64 = 31_536_000;

/// Caching intent attached by a caller to a fetch or a page render.
///
/// The directive describes whether and for how long a computed result may
/// be reused. Nothing in this crate acts on it; the content fetcher
/// annotates outbound requests with it and the render cache honors it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheDirective {
    /// Recompute on every request; never reuse a cached result.
    AlwaysFresh,

    /// Compute once, reuse indefinitely.
    CacheIndefinitely,

    /// Reuse until `after` elapses; `None` means the result only goes
    /// away through explicit invalidation. Any attached tag can be used
    /// to discard the result early.
    Revalidate {
        after: Option<Duration>,
        tags: Vec<String>,
    },
}

impl CacheDirective {
    /// Timed revalidation: reuse for `window`, then recompute.
    pub fn revalidate_after(window: Duration, tags: Vec<String>) -> Self {
        Self::Revalidate {
            after: Some(window),
            tags,
        }
    }

    /// Reuse until one of `tags` (or the path itself) is invalidated.
    pub fn until_invalidated(tags: Vec<String>) -> Self {
        Self::Revalidate { after: None, tags }
    }

    /// The `Cache-Control` rendering of this intent, attached verbatim to
    /// outbound requests so intermediaries see the caller's intent.
    pub fn cache_control(&self) -> String {
        match self {
            Self::AlwaysFresh => "no-store".to_string(),
            Self::CacheIndefinitely => format!("max-age={INDEFINITE_MAX_AGE_SECS}"),
            Self::Revalidate { after: Some(d), .. } => format!("max-age={}", d.as_secs()),
            Self::Revalidate { after: None, .. } => format!("max-age={INDEFINITE_MAX_AGE_SECS}"),
        }
    }

    /// Invalidation tags carried by this directive; empty for the simple
    /// modes.
    pub fn tags(&self) -> &[String] {
        match self {
            Self::Revalidate { tags, .. } => tags,
            _ => &[],
        }
    }
}
