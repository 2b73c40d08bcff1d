// renderlab server binary

use renderlab::Config;
use renderlab_server::routes::pages;
use renderlab_server::AppState;
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .init();

    let config = Config::from_env();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(
        cms = %config.cms.base_url,
        collection = %config.cms.collection,
        "starting renderlab"
    );

    let state = match AppState::new(config).await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to initialize: {:#}", e);
            std::process::exit(1);
        }
    };

    // Build step: put every known slug's static page into the cache
    let rendered = pages::prerender(&state).await;
    info!(
        pages = rendered,
        backend = state.cache.backend_name(),
        "static pre-render complete"
    );

    let app = renderlab_server::app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    println!("renderlab running at http://{}", addr);
    axum::serve(listener, app).await.unwrap();
}
