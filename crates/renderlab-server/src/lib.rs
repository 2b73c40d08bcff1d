// renderlab-server - the demo application
// Five strategy pages, a comparison page, and the JSON API, all over one
// shared state (CMS client, metrics prober, render cache).

pub mod routes;
pub mod state;
pub mod strategy;
pub mod views;

pub use state::AppState;
pub use strategy::Strategy;

use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the application router over `state`
pub fn app(state: AppState) -> Router {
    routes::router(state).layer(TraceLayer::new_for_http())
}
