use std::sync::Arc;

use tera::Tera;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::PosterProvider,
    store::FeatureStore,
    web,
};

/// Shared application state
///
/// Everything here is read-only after startup, so cloning per request only
/// bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FeatureStore>,
    pub posters: Arc<dyn PosterProvider>,
    pub templates: Arc<Tera>,
    pub settings: RecommendationSettings,
}

impl AppState {
    pub fn new(
        store: Arc<FeatureStore>,
        posters: Arc<dyn PosterProvider>,
        settings: RecommendationSettings,
    ) -> AppResult<Self> {
        Ok(Self {
            store,
            posters,
            templates: Arc::new(web::templates()?),
            settings,
        })
    }
}

/// Request limits and presentation knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationSettings {
    pub default_top_n: usize,
    pub max_top_n: usize,
    pub grid_columns: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            default_top_n: 10,
            max_top_n: 50,
            grid_columns: 5,
        }
    }
}

impl RecommendationSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_top_n: config.default_top_n,
            max_top_n: config.max_top_n,
            grid_columns: config.grid_columns,
        }
    }

    /// Applies the default count and rejects counts above the limit
    pub fn resolve_top_n(&self, requested: Option<usize>) -> AppResult<usize> {
        let top_n = requested.unwrap_or(self.default_top_n);
        if top_n > self.max_top_n {
            return Err(AppError::InvalidInput(format!(
                "top_n must be at most {}",
                self.max_top_n
            )));
        }
        Ok(top_n)
    }
}
