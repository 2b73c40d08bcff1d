// File: src/routes/mod.rs
// Purpose: Route table for the demo application

pub mod api;
pub mod pages;

use crate::state::AppState;
use axum::routing::get;
use axum::Router;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/ssr/:slug", get(pages::ssr))
        .route("/ssg/:slug", get(pages::ssg))
        .route("/isr/:slug", get(pages::isr))
        .route("/on-demand/:slug", get(pages::on_demand))
        .route("/csr/:slug", get(pages::csr))
        .route("/compare/:slug", get(pages::compare))
        .route(
            "/api/revalidate",
            get(api::revalidate_docs).post(api::revalidate),
        )
        .route("/api/metrics", get(api::metrics_docs).post(api::metrics))
        .route("/api/content/:slug", get(api::content))
        .with_state(state)
}
