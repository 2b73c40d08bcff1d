//! # renderlab-cache - Render cache
//!
//! This crate stores rendered pages and honors the caller's cache
//! directive. It stands in for the hosting-platform cache the rendering
//! strategies assume: pages ask to "render with directive D" and the
//! revalidation endpoint asks to "invalidate path/tag T".
//!
//! ## Features
//!
//! - **Directive-honoring engine**: always-fresh bypass, indefinite
//!   caching, timed revalidation, tag/path invalidation
//! - **Two storage backends**: memory (default) and filesystem
//!   (persistent across restarts)
//! - **Synchronous regeneration**: a stale entry is rebuilt inside the
//!   request that found it stale; no background tasks
//!
//! ## Example
//!
//! ```rust
//! use renderlab::CacheDirective;
//! use renderlab_cache::{RenderCache, StoreBackend};
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache = RenderCache::new(StoreBackend::Memory).await.unwrap();
//!
//!     let (html, outcome) = cache
//!         .render_with("/ssg/hello", &CacheDirective::CacheIndefinitely, || async {
//!             Ok("<html>hello</html>".to_string())
//!         })
//!         .await
//!         .unwrap();
//!
//!     println!("{outcome:?}: {html}");
//! }
//! ```

pub mod config;
pub mod engine;
pub mod entry;
pub mod store;

pub use config::StoreBackend;
pub use engine::{CacheOutcome, RenderCache};
pub use entry::{CachedRender, RenderStats};
