// File: src/strategy.rs
// Purpose: The five rendering strategies and the cache directive each one
// attaches to its renders

use renderlab::config::RenderConfig;
use renderlab::CacheDirective;

/// Invalidation tag shared by every cached render of one content item
pub fn content_tag(slug: &str) -> String {
    format!("item:{}", slug)
}

/// One of the five rendering strategies on display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Server-rendered on every request
    Ssr,
    /// Rendered once, served unchanged afterwards
    Ssg,
    /// Rendered from cache within a timed window, rebuilt after it
    Isr,
    /// Rendered from cache until explicitly revalidated
    OnDemand,
    /// Static shell; the browser fetches the content itself
    Csr,
}

impl Strategy {
    /// Every strategy, in the order pages and tables present them
    pub const ALL: [Strategy; 5] = [
        Strategy::Ssr,
        Strategy::Ssg,
        Strategy::Isr,
        Strategy::OnDemand,
        Strategy::Csr,
    ];

    /// Short name shown in badges and table headers
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ssr => "SSR",
            Self::Ssg => "SSG",
            Self::Isr => "ISR",
            Self::OnDemand => "On-demand",
            Self::Csr => "CSR",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Ssr => "Server-Side Rendering",
            Self::Ssg => "Static Site Generation",
            Self::Isr => "Incremental Static Regeneration",
            Self::OnDemand => "On-Demand Revalidation",
            Self::Csr => "Client-Side Rendering",
        }
    }

    /// One-paragraph explanation shown in the strategy badge
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Ssr => {
                "Rendered on the server for every request. The content is \
                 always current, and the full rendering cost is paid on \
                 each visit."
            }
            Self::Ssg => {
                "Rendered once (at startup, or on the first visit for items \
                 that appeared later) and served unchanged afterwards. Fast \
                 and cheap, but the content freezes until the cache is \
                 rebuilt."
            }
            Self::Isr => {
                "Served from cache while the revalidation window is open. \
                 The first request after the window closes rebuilds the page \
                 in place and resets the window."
            }
            Self::OnDemand => {
                "Served from cache indefinitely. Nothing expires by time; \
                 the page only changes after an explicit POST to \
                 /api/revalidate."
            }
            Self::Csr => {
                "The server sends a static shell with no content in it. \
                 The browser fetches the content item as JSON after load \
                 and fills the page in."
            }
        }
    }

    pub fn path_prefix(&self) -> &'static str {
        match self {
            Self::Ssr => "/ssr",
            Self::Ssg => "/ssg",
            Self::Isr => "/isr",
            Self::OnDemand => "/on-demand",
            Self::Csr => "/csr",
        }
    }

    /// Route (and cache key) of this strategy's page for one slug
    pub fn page_path(&self, slug: &str) -> String {
        format!("{}/{}", self.path_prefix(), slug)
    }

    /// The cache directive this strategy attaches to its renders
    pub fn directive(&self, render: &RenderConfig, slug: &str) -> CacheDirective {
        match self {
            Self::Ssr => CacheDirective::AlwaysFresh,
            // The CSR shell carries no content, so it can be cached forever
            Self::Ssg | Self::Csr => CacheDirective::CacheIndefinitely,
            Self::Isr => CacheDirective::revalidate_after(
                render.isr_revalidate,
                vec![content_tag(slug)],
            ),
            Self::OnDemand => CacheDirective::until_invalidated(vec![content_tag(slug)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn render_config() -> RenderConfig {
        RenderConfig {
            isr_revalidate: Duration::from_secs(10),
            cache_backend: "memory".to_string(),
            cache_dir: ".renderlab/cache".to_string(),
        }
    }

    #[test]
    fn test_page_paths() {
        assert_eq!(Strategy::Ssr.page_path("hello"), "/ssr/hello");
        assert_eq!(Strategy::OnDemand.page_path("hello"), "/on-demand/hello");
    }

    #[test]
    fn test_directives_per_strategy() {
        let config = render_config();

        assert_eq!(
            Strategy::Ssr.directive(&config, "a"),
            CacheDirective::AlwaysFresh
        );
        assert_eq!(
            Strategy::Ssg.directive(&config, "a"),
            CacheDirective::CacheIndefinitely
        );
        assert_eq!(
            Strategy::Csr.directive(&config, "a"),
            CacheDirective::CacheIndefinitely
        );
        assert_eq!(
            Strategy::Isr.directive(&config, "a"),
            CacheDirective::Revalidate {
                after: Some(Duration::from_secs(10)),
                tags: vec!["item:a".to_string()],
            }
        );
        assert_eq!(
            Strategy::OnDemand.directive(&config, "a"),
            CacheDirective::Revalidate {
                after: None,
                tags: vec!["item:a".to_string()],
            }
        );
    }

    #[test]
    fn test_content_tag() {
        assert_eq!(content_tag("hello-world"), "item:hello-world");
    }
}
