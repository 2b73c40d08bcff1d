// File: src/state.rs
// Purpose: Shared application state wired up from configuration

use anyhow::Result;
use renderlab::{CmsClient, Config, Probe};
use renderlab_cache::{RenderCache, StoreBackend};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cms: CmsClient,
    pub probe: Probe,
    pub cache: RenderCache,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        let cms = CmsClient::new(&config.cms)?;
        let probe = Probe::new(&config.server.public_origin)?;

        let backend =
            StoreBackend::parse(&config.render.cache_backend, &config.render.cache_dir)?;
        let cache = RenderCache::new(backend).await?;

        Ok(Self {
            config: Arc::new(config),
            cms,
            probe,
            cache,
        })
    }
}
