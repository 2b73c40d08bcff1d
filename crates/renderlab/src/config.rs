// File: src/config.rs
// Purpose: Environment-provided application configuration

use std::env;
use std::time::Duration;

/// Application configuration, read once at startup.
///
/// Every value is environment-provided with a local-development fallback;
/// nothing is validated beyond parseability (unparseable numbers fall back
/// to their defaults).
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub cms: CmsConfig,
    pub server: ServerConfig,
    pub render: RenderConfig,
}

/// Headless CMS connection settings
#[derive(Debug, Clone)]
pub struct CmsConfig {
    /// Base URL of the CMS (`CMS_URL`)
    pub base_url: String,

    /// Collection holding the content items (`CMS_COLLECTION`)
    pub collection: String,

    /// Static bearer credential; requests go unauthenticated when unset
    /// (`CMS_TOKEN`)
    pub token: Option<String>,
}

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host (`HOST`)
    pub host: String,

    /// Bind port (`PORT`)
    pub port: u16,

    /// Public origin of this deployment, used to resolve site-relative
    /// probe URLs (`PUBLIC_ORIGIN`)
    pub public_origin: String,

    /// Shared secret for the revalidation endpoint; enforced whenever set
    /// (`REVALIDATE_SECRET`)
    pub revalidate_secret: Option<String>,
}

/// Render cache settings
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Freshness window of the timed-regeneration page
    /// (`ISR_REVALIDATE_SECONDS`)
    pub isr_revalidate: Duration,

    /// Render cache backend, "memory" or "filesystem" (`CACHE_BACKEND`)
    pub cache_backend: String,

    /// Cache directory for the filesystem backend (`CACHE_DIR`)
    pub cache_dir: String,
}

// Default values
fn default_cms_url() -> String {
    "http://localhost:8055".to_string()
}

fn default_collection() -> String {
    "posts".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_public_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_isr_revalidate_secs() -> u64 {
    10
}

fn default_cache_backend() -> String {
    "memory".to_string()
}

fn default_cache_dir() -> String {
    ".renderlab/cache".to_string()
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            base_url: default_cms_url(),
            collection: default_collection(),
            token: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_origin: default_public_origin(),
            revalidate_secret: None,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            isr_revalidate: Duration::from_secs(default_isr_revalidate_secs()),
            cache_backend: default_cache_backend(),
            cache_dir: default_cache_dir(),
        }
    }
}

impl Config {
    /// Build the configuration from process environment variables,
    /// falling back to local-development defaults.
    pub fn from_env() -> Self {
        Self {
            cms: CmsConfig {
                base_url: env_or("CMS_URL", default_cms_url),
                collection: env_or("CMS_COLLECTION", default_collection),
                token: env_opt("CMS_TOKEN"),
            },
            server: ServerConfig {
                host: env_or("HOST", default_host),
                port: env_parsed("PORT", default_port),
                public_origin: env_or("PUBLIC_ORIGIN", default_public_origin),
                revalidate_secret: env_opt("REVALIDATE_SECRET"),
            },
            render: RenderConfig {
                isr_revalidate: Duration::from_secs(env_parsed(
                    "ISR_REVALIDATE_SECONDS",
                    default_isr_revalidate_secs,
                )),
                cache_backend: env_or("CACHE_BACKEND", default_cache_backend),
                cache_dir: env_or("CACHE_DIR", default_cache_dir),
            },
        }
    }
}

/// Read a variable, falling back when unset or blank.
fn env_or(key: &str, fallback: fn() -> String) -> String {
    env_opt(key).unwrap_or_else(fallback)
}

/// Read an optional variable; blank counts as unset.
fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Read and parse a variable, falling back when unset or unparseable.
fn env_parsed<T: std::str::FromStr>(key: &str, fallback: fn() -> T) -> T {
    env_opt(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or_else(fallback)
}
