// File: src/probe.rs
// Purpose: Timing prober for the strategy pages - TTFB, total duration,
// and a response summary per probed URL

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header;
use serde::{Deserialize, Serialize};

/// Characters of collapsed body text kept in the preview.
const PREVIEW_CHARS: usize = 300;

static WHITESPACE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Everything one probe observed about one URL.
///
/// `ttfb_ms <= total_ms` always holds: TTFB is captured when the response
/// headers arrive, before the body is drained. A probe that fails carries
/// the sentinel `status: 0` and a populated `error` instead of raising.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsResult {
    pub url: String,
    /// HTTP status, or `0` when the probe failed outright.
    pub status: u16,
    pub status_text: String,
    /// Milliseconds until response headers arrived.
    pub ttfb_ms: u64,
    /// Milliseconds until the body was fully read.
    pub total_ms: u64,
    /// Raw body length in bytes (multi-byte text sized correctly).
    pub size_bytes: usize,
    /// Human form of `size_bytes`, e.g. `"12.4 KB"`.
    pub size_kb: String,
    /// Every response header; repeated names comma-joined.
    pub headers: BTreeMap<String, String>,
    /// First 300 characters of the body with whitespace runs collapsed.
    pub preview: String,
    pub measured_at: DateTime<Utc>,
    pub error: Option<String>,
}

impl MetricsResult {
    /// Uniform failure shape: sentinel status, no headers, no body data,
    /// whatever time elapsed before the failure. `ttfb` equals `total`
    /// when the request never got as far as response headers.
    pub fn failed(url: &str, ttfb: Duration, total: Duration, message: &str) -> Self {
        Self {
            url: url.to_string(),
            status: 0,
            status_text: "probe failed".to_string(),
            ttfb_ms: as_millis(ttfb),
            total_ms: as_millis(total),
            size_bytes: 0,
            size_kb: kilobytes(0),
            headers: BTreeMap::new(),
            preview: String::new(),
            measured_at: Utc::now(),
            error: Some(message.to_string()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Issues measurement GETs against strategy pages (or any URL).
#[derive(Debug, Clone)]
pub struct Probe {
    http: reqwest::Client,
    origin: String,
}

impl Probe {
    /// `origin` anchors site-relative probe targets (`/ssr/hello` becomes
    /// `{origin}/ssr/hello`).
    pub fn new(origin: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("renderlab-probe/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build probe HTTP client")?;

        Ok(Self {
            http,
            origin: origin.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a site-relative path against the configured origin;
    /// absolute URLs pass through untouched.
    pub fn resolve(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", self.origin, url)
        } else {
            url.to_string()
        }
    }

    /// Measure one URL. Total function: transport errors, bad statuses,
    /// and body-read failures all come back as a `MetricsResult`, never
    /// as a panic or an `Err`.
    pub async fn measure(&self, url: &str) -> MetricsResult {
        let target = self.resolve(url);
        let started = Instant::now();

        let response = match self
            .http
            .get(&target)
            .header(header::ACCEPT, "text/html")
            .header(header::CACHE_CONTROL, "no-cache")
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let elapsed = started.elapsed();
                tracing::warn!(url = %target, error = %err, "probe failed before headers");
                return MetricsResult::failed(&target, elapsed, elapsed, &err.to_string());
            }
        };

        // send() resolves once headers are in; the body is still unread.
        let ttfb = started.elapsed();
        let status = response.status();
        let headers = header_map(response.headers());

        let body = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                let total = started.elapsed();
                tracing::warn!(url = %target, error = %err, "probe body read failed");
                return MetricsResult::failed(&target, ttfb, total, &err.to_string());
            }
        };
        let total = started.elapsed();

        MetricsResult {
            url: target,
            status: status.as_u16(),
            status_text: status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
            ttfb_ms: as_millis(ttfb),
            total_ms: as_millis(total),
            size_bytes: body.len(),
            size_kb: kilobytes(body.len()),
            headers,
            preview: preview(&body),
            measured_at: Utc::now(),
            error: None,
        }
    }
}

fn as_millis(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

fn kilobytes(bytes: usize) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

fn preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let collapsed = WHITESPACE_RUN_REGEX.replace_all(&text, " ");
    collapsed.chars().take(PREVIEW_CHARS).collect()
}

fn header_map(headers: &reqwest::header::HeaderMap) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).to_string();
        map.entry(name.as_str().to_string())
            .and_modify(|joined: &mut String| {
                joined.push_str(", ");
                joined.push_str(&value);
            })
            .or_insert(value);
    }
    map
}
