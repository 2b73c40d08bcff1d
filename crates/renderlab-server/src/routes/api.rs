// File: src/routes/api.rs
// Purpose: JSON endpoints - revalidation trigger, metrics probe, content

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use renderlab::CacheDirective;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::state::AppState;
use crate::strategy::content_tag;

#[derive(Debug, Deserialize)]
pub struct RevalidateRequest {
    /// Which content item to revalidate. `identifier` is accepted as an
    /// alias so callers holding the CMS field name work unchanged.
    #[serde(alias = "identifier")]
    slug: Option<String>,
    secret: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MetricsRequest {
    url: Option<String>,
}

/// POST /api/revalidate - drop the cached renders for one slug
pub async fn revalidate(
    State(state): State<AppState>,
    request: Option<Json<RevalidateRequest>>,
) -> Response {
    let Some(Json(request)) = request else {
        return failure(
            StatusCode::BAD_REQUEST,
            "Request body must be JSON with a slug field",
        );
    };

    let slug = request.slug.unwrap_or_default();
    if slug.is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Missing slug");
    }

    // Secret checking is on whenever a secret is configured; without one
    // the endpoint stays open and says so in the log.
    match &state.config.server.revalidate_secret {
        Some(expected) => {
            if request.secret.as_deref() != Some(expected.as_str()) {
                tracing::warn!(slug, "revalidation rejected: bad or missing secret");
                return failure(StatusCode::UNAUTHORIZED, "Invalid revalidation secret");
            }
        }
        None => {
            tracing::warn!(
                slug,
                "revalidation accepted without a secret check (REVALIDATE_SECRET unset)"
            );
        }
    }

    let revalidated = vec![format!("/isr/{}", slug), format!("/on-demand/{}", slug)];

    if let Err(err) = invalidate_slug(&state, &slug, &revalidated).await {
        tracing::error!(slug, error = %err, "revalidation failed");
        return failure(StatusCode::INTERNAL_SERVER_ERROR, "Revalidation failed");
    }

    Json(json!({
        "success": true,
        "slug": slug,
        "revalidated": revalidated,
        "timestamp": Utc::now(),
    }))
    .into_response()
}

/// GET /api/revalidate - usage documentation
pub async fn revalidate_docs() -> Json<Value> {
    Json(json!({
        "endpoint": "/api/revalidate",
        "method": "POST",
        "body": {
            "slug": "content item to revalidate (alias: identifier)",
            "secret": "required when REVALIDATE_SECRET is configured",
        },
        "effect": "drops the cached /isr/{slug} and /on-demand/{slug} renders",
        "example": { "slug": "hello-world" },
    }))
}

/// POST /api/metrics - probe one URL and report what was measured
pub async fn metrics(
    State(state): State<AppState>,
    request: Option<Json<MetricsRequest>>,
) -> Response {
    let url = request
        .and_then(|Json(request)| request.url)
        .unwrap_or_default();

    if url.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing url" })),
        )
            .into_response();
    }
    if !probe_url_acceptable(&url) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "url must be http(s) or site-relative" })),
        )
            .into_response();
    }

    let result = state.probe.measure(&url).await;
    Json(result).into_response()
}

/// GET /api/metrics - usage documentation
pub async fn metrics_docs() -> Json<Value> {
    Json(json!({
        "endpoint": "/api/metrics",
        "method": "POST",
        "body": {
            "url": "absolute http(s) URL, or a site-relative path like /ssr/hello-world",
        },
        "returns": "timing, size, headers, and a body preview for the probed URL",
        "example": { "url": "/ssr/hello-world" },
    }))
}

/// GET /api/content/:slug - the content item as JSON, for the CSR page
pub async fn content(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.cms.fetch_item(&slug, &CacheDirective::AlwaysFresh).await {
        Some(item) => Json(item).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("No content item for slug '{}'", slug) })),
        )
            .into_response(),
    }
}

/// Drop the shared content tag plus both strategy paths for one slug
async fn invalidate_slug(state: &AppState, slug: &str, paths: &[String]) -> anyhow::Result<()> {
    let dropped = state.cache.invalidate_tag(&content_tag(slug)).await?;

    for path in paths {
        state.cache.invalidate_path(path).await?;
    }

    tracing::info!(slug, dropped, "cached renders revalidated");
    Ok(())
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

fn probe_url_acceptable(url: &str) -> bool {
    url.starts_with('/') || url.starts_with("http://") || url.starts_with("https://")
}
