//! Integration tests for the five strategy pages
//!
//! Real HTTP round trips against the app over a stub CMS. Covers:
//! - Cache outcome transitions per strategy (the x-render-cache header)
//! - Frozen timestamps for cached copies
//! - Timed (ISR) and explicit (on-demand) revalidation
//! - The CSR shell, the comparison page, and startup pre-rendering

mod common;

use common::{cache_header, spawn_app};
use pretty_assertions::assert_eq;
use renderlab_server::routes::pages;
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn test_ssr_bypasses_the_cache() {
    let app = spawn_app().await;

    let first = app.get("/ssr/hello-world").await;
    assert_eq!(first.status(), 200);
    assert_eq!(cache_header(&first), "BYPASS");
    let first_body = first.text().await.unwrap();

    let second = app.get("/ssr/hello-world").await;
    assert_eq!(cache_header(&second), "BYPASS");
    let second_body = second.text().await.unwrap();

    assert!(first_body.contains("Hello World"));
    // Fresh render each time: the baked generation timestamps differ
    assert_ne!(first_body, second_body);
    assert!(app.state.cache.keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_ssg_serves_a_frozen_copy() {
    let app = spawn_app().await;

    let first = app.get("/ssg/hello-world").await;
    assert_eq!(cache_header(&first), "MISS");
    let first_body = first.text().await.unwrap();

    let second = app.get("/ssg/hello-world").await;
    assert_eq!(cache_header(&second), "HIT");
    let second_body = second.text().await.unwrap();

    // Identical bytes, identical baked timestamp
    assert_eq!(first_body, second_body);
}

#[tokio::test]
async fn test_ssg_ignores_cms_edits_until_revalidated() {
    let app = spawn_app().await;

    app.get("/ssg/hello-world").await;
    app.cms.set_title("hello-world", "Edited Title");

    let cached = app.get("/ssg/hello-world").await;
    assert_eq!(cache_header(&cached), "HIT");
    let body = cached.text().await.unwrap();
    assert!(body.contains("Hello World"));
    assert!(!body.contains("Edited Title"));
}

#[tokio::test]
async fn test_prerender_warms_the_static_cache() {
    let app = spawn_app().await;

    let rendered = pages::prerender(&app.state).await;
    assert_eq!(rendered, 2);

    // First request is already a hit
    let response = app.get("/ssg/hello-world").await;
    assert_eq!(cache_header(&response), "HIT");

    let response = app.get("/ssg/rendering-strategies").await;
    assert_eq!(cache_header(&response), "HIT");
}

#[tokio::test]
async fn test_isr_regenerates_after_the_window() {
    let app = spawn_app().await;

    let first = app.get("/isr/hello-world").await;
    assert_eq!(cache_header(&first), "MISS");

    let second = app.get("/isr/hello-world").await;
    assert_eq!(cache_header(&second), "HIT");

    // The test config's window is 200ms
    tokio::time::sleep(Duration::from_millis(300)).await;

    let third = app.get("/isr/hello-world").await;
    assert_eq!(cache_header(&third), "REGENERATED");

    let fourth = app.get("/isr/hello-world").await;
    assert_eq!(cache_header(&fourth), "HIT");
}

#[tokio::test]
async fn test_on_demand_holds_until_revalidated() {
    let app = spawn_app().await;

    let first = app.get("/on-demand/hello-world").await;
    assert_eq!(cache_header(&first), "MISS");

    // Far beyond the ISR window: no timed expiry applies here
    tokio::time::sleep(Duration::from_millis(300)).await;

    let second = app.get("/on-demand/hello-world").await;
    assert_eq!(cache_header(&second), "HIT");

    app.cms.set_title("hello-world", "Updated Title");
    let response = app
        .post_json("/api/revalidate", json!({ "slug": "hello-world" }))
        .await;
    assert_eq!(response.status(), 200);

    let third = app.get("/on-demand/hello-world").await;
    assert_eq!(cache_header(&third), "MISS");
    assert!(third.text().await.unwrap().contains("Updated Title"));
}

#[tokio::test]
async fn test_revalidate_also_drops_the_isr_copy() {
    let app = spawn_app().await;

    app.get("/isr/hello-world").await;
    let cached = app.get("/isr/hello-world").await;
    assert_eq!(cache_header(&cached), "HIT");

    app.post_json("/api/revalidate", json!({ "slug": "hello-world" }))
        .await;

    let after = app.get("/isr/hello-world").await;
    assert_eq!(cache_header(&after), "MISS");
}

#[tokio::test]
async fn test_csr_shell_is_cached_and_content_free() {
    let app = spawn_app().await;

    let first = app.get("/csr/hello-world").await;
    assert_eq!(cache_header(&first), "MISS");
    let body = first.text().await.unwrap();

    assert!(body.contains(r#"fetch("/api/content/hello-world")"#));
    // The shell itself carries no CMS content
    assert!(!body.contains("First post"));

    let second = app.get("/csr/hello-world").await;
    assert_eq!(cache_header(&second), "HIT");
}

#[tokio::test]
async fn test_missing_item_renders_not_found_panel() {
    let app = spawn_app().await;

    let response = app.get("/ssr/ghost-item").await;
    assert_eq!(response.status(), 200);
    assert_eq!(cache_header(&response), "BYPASS");
    assert!(response.text().await.unwrap().contains("Content not found"));
}

#[tokio::test]
async fn test_missing_item_is_cached_under_the_page_directive() {
    let app = spawn_app().await;

    let first = app.get("/ssg/ghost-item").await;
    assert_eq!(cache_header(&first), "MISS");

    // Static semantics: the not-found render freezes too
    let second = app.get("/ssg/ghost-item").await;
    assert_eq!(cache_header(&second), "HIT");
}

#[tokio::test]
async fn test_compare_page_probes_every_strategy() {
    let app = spawn_app().await;

    let response = app.get("/compare/hello-world").await;
    assert_eq!(response.status(), 200);
    assert_eq!(cache_header(&response), "BYPASS");

    let body = response.text().await.unwrap();
    for label in ["SSR", "SSG", "ISR", "On-demand", "CSR"] {
        assert!(body.contains(label), "missing strategy row: {}", label);
    }
    // The probed pages' cache outcomes land in the table
    assert!(body.contains("BYPASS"));
    assert!(body.contains("MISS"));
}

#[tokio::test]
async fn test_index_links_every_item_and_reports_the_cache() {
    let app = spawn_app().await;
    app.get("/ssg/hello-world").await;

    let response = app.get("/").await;
    assert_eq!(response.status(), 200);
    assert_eq!(cache_header(&response), "BYPASS");

    let body = response.text().await.unwrap();
    assert!(body.contains("/ssr/hello-world"));
    assert!(body.contains("/compare/rendering-strategies"));
    assert!(body.contains("memory"));
    assert!(body.contains("1 cached renders"));
}
