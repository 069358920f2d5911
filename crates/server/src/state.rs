use std::sync::Arc;

use cineniche_core::{Config, MovieCatalog, PosterCache, Recommender, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    catalog: Arc<dyn MovieCatalog>,
    poster_cache: Arc<PosterCache>,
    recommender: Recommender,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: Arc<dyn MovieCatalog>,
        poster_cache: Arc<PosterCache>,
    ) -> Self {
        let recommender = Recommender::new(Arc::clone(&catalog));
        Self {
            config,
            catalog,
            poster_cache,
            recommender,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn catalog(&self) -> &dyn MovieCatalog {
        self.catalog.as_ref()
    }

    pub fn poster_cache(&self) -> &PosterCache {
        &self.poster_cache
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }
}
