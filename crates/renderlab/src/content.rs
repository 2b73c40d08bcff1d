// File: src/content.rs
// Purpose: HTTP client for the headless CMS items API

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::header;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::CmsConfig;
use crate::directive::CacheDirective;

/// One content item as the CMS stores it. Read-only on this side; a copy
/// lives for at most one request/render cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// URL-safe unique identifier, also the route segment for every page.
    pub slug: String,
    pub title: String,
    /// HTML-bearing body, inserted verbatim into pages. The CMS is trusted.
    #[serde(default)]
    pub body: String,
    /// Absent until the item has been edited at least once.
    #[serde(rename = "date_updated")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Directus-style response envelope: every items call wraps its rows
/// in a `data` array.
#[derive(Debug, Deserialize)]
struct ItemsEnvelope<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct SlugRow {
    slug: String,
}

/// Client for the CMS items API.
///
/// Both fetch methods are total: any failure (transport, status, decode)
/// folds into the "nothing there" return value after logging. Callers
/// render a not-found panel either way, so they never see an error type.
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    base_url: String,
    collection: String,
    token: Option<String>,
}

impl CmsClient {
    pub fn new(config: &CmsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("renderlab/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build CMS HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
            token: config.token.clone(),
        })
    }

    /// Fetch a single item by slug. The directive is forwarded as the
    /// request's `Cache-Control` annotation; this client itself caches
    /// nothing. Returns `None` for zero matches and for every failure.
    pub async fn fetch_item(&self, slug: &str, directive: &CacheDirective) -> Option<ContentItem> {
        if slug.is_empty() {
            tracing::warn!("fetch_item called with an empty slug");
            return None;
        }

        let url = self.item_url(slug);
        match self.get_items::<ContentItem>(&url, directive).await {
            Ok(mut items) => {
                if items.is_empty() {
                    tracing::debug!(slug, "no content item matched");
                    None
                } else {
                    Some(items.swap_remove(0))
                }
            }
            Err(err) => {
                tracing::warn!(slug, error = %err, "content item fetch failed");
                None
            }
        }
    }

    /// Enumerate every slug in the collection, in CMS order. Always
    /// annotated fresh: callers use this to discover what exists right
    /// now (startup pre-render, index page). Empty on any failure.
    pub async fn fetch_slugs(&self) -> Vec<String> {
        let url = self.slugs_url();
        match self
            .get_items::<SlugRow>(&url, &CacheDirective::AlwaysFresh)
            .await
        {
            Ok(rows) => rows.into_iter().map(|row| row.slug).collect(),
            Err(err) => {
                tracing::warn!(error = %err, "slug enumeration failed");
                Vec::new()
            }
        }
    }

    async fn get_items<T: DeserializeOwned>(
        &self,
        url: &str,
        directive: &CacheDirective,
    ) -> Result<Vec<T>> {
        let mut request = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .header(header::CACHE_CONTROL, directive.cache_control());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .context("CMS request failed")?
            .error_for_status()
            .context("CMS returned an error status")?;

        let envelope: ItemsEnvelope<T> = response
            .json()
            .await
            .context("CMS response body did not decode")?;
        Ok(envelope.data)
    }

    fn item_url(&self, slug: &str) -> String {
        format!(
            "{}/items/{}?filter[slug][_eq]={}&fields=slug,title,body,date_updated",
            self.base_url,
            self.collection,
            urlencoding::encode(slug)
        )
    }

    fn slugs_url(&self) -> String {
        format!("{}/items/{}?fields=slug", self.base_url, self.collection)
    }
}
