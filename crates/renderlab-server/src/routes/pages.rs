// File: src/routes/pages.rs
// Purpose: The five strategy pages, the landing page, and the comparison
// page - everything a browser sees

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;
use renderlab::CacheDirective;
use renderlab_cache::CacheOutcome;
use std::time::Duration;

use crate::state::AppState;
use crate::strategy::Strategy;
use crate::views;

/// Pause between the comparison page's sequential probes, so one
/// measurement never overlaps the next
const PROBE_PAUSE: Duration = Duration::from_millis(250);

pub async fn index(State(state): State<AppState>) -> Response {
    let slugs = state.cms.fetch_slugs().await;
    let stats = state.cache.stats().await;
    let entries = state.cache.keys().await.map(|keys| keys.len()).unwrap_or(0);
    let size_bytes = state.cache.size_bytes().await.unwrap_or(0);

    let markup = views::index_page(
        &slugs,
        &stats,
        state.cache.backend_name(),
        entries,
        size_bytes,
    );
    page_response(markup.into_string(), CacheOutcome::Bypass)
}

pub async fn ssr(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    strategy_response(&state, Strategy::Ssr, &slug).await
}

pub async fn ssg(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    strategy_response(&state, Strategy::Ssg, &slug).await
}

pub async fn isr(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    strategy_response(&state, Strategy::Isr, &slug).await
}

pub async fn on_demand(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    strategy_response(&state, Strategy::OnDemand, &slug).await
}

pub async fn csr(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    strategy_response(&state, Strategy::Csr, &slug).await
}

/// Probe all five strategy pages for one slug, strictly one at a time
pub async fn compare(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let mut rows = Vec::with_capacity(Strategy::ALL.len());

    for (i, strategy) in Strategy::ALL.into_iter().enumerate() {
        let result = state.probe.measure(&strategy.page_path(&slug)).await;
        rows.push((strategy, result));

        if i + 1 < Strategy::ALL.len() {
            tokio::time::sleep(PROBE_PAUSE).await;
        }
    }

    let markup = views::compare_page(&slug, &rows);
    page_response(markup.into_string(), CacheOutcome::Bypass)
}

/// Render every known slug's static page up front (the "build step").
/// Returns how many pages went into the cache.
pub async fn prerender(state: &AppState) -> usize {
    let slugs = state.cms.fetch_slugs().await;
    let mut rendered = 0;

    for slug in &slugs {
        match strategy_render(state, Strategy::Ssg, slug).await {
            Ok(_) => rendered += 1,
            Err(err) => {
                tracing::warn!(slug, error = %err, "startup pre-render failed");
            }
        }
    }

    rendered
}

/// Render one strategy page through the cache
pub(crate) async fn strategy_render(
    state: &AppState,
    strategy: Strategy,
    slug: &str,
) -> anyhow::Result<(String, CacheOutcome)> {
    let directive = strategy.directive(&state.config.render, slug);
    let path = strategy.page_path(slug);

    state
        .cache
        .render_with(&path, &directive, || async {
            Ok(generate_page(state, strategy, slug, &directive).await)
        })
        .await
}

async fn strategy_response(state: &AppState, strategy: Strategy, slug: &str) -> Response {
    match strategy_render(state, strategy, slug).await {
        Ok((html, outcome)) => page_response(html, outcome),
        Err(err) => {
            tracing::error!(slug, strategy = strategy.name(), error = %err, "page render failed");
            let markup = views::error_page(
                "Render failed",
                "The page could not be rendered. Check the server logs and try again.",
            );
            (StatusCode::INTERNAL_SERVER_ERROR, Html(markup.into_string())).into_response()
        }
    }
}

/// Build the page markup. Total: a missing item becomes the not-found
/// panel, which is cached under the page's own directive like any other
/// render.
async fn generate_page(
    state: &AppState,
    strategy: Strategy,
    slug: &str,
    directive: &CacheDirective,
) -> String {
    let generated_at = Utc::now();

    let markup = match strategy {
        Strategy::Csr => views::csr_shell(slug, generated_at),
        _ => {
            let item = state.cms.fetch_item(slug, directive).await;
            views::strategy_page(strategy, slug, item.as_ref(), generated_at)
        }
    };

    markup.into_string()
}

fn page_response(html: String, outcome: CacheOutcome) -> Response {
    (
        [("x-render-cache", outcome.header_value())],
        Html(html),
    )
        .into_response()
}
