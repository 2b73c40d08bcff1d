// renderlab - five rendering strategies over a headless CMS
// Core library: configuration, cache directives, and the two leaf
// utilities (content fetcher, metrics prober) everything else consumes.

pub mod config;
pub mod content;
pub mod directive;
pub mod probe;

// Re-export the handful of types the server works with constantly
pub use config::Config;
pub use content::{CmsClient, ContentItem};
pub use directive::CacheDirective;
pub use probe::{MetricsResult, Probe};
