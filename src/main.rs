use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use reelmatch_api::{
    config::Config,
    routes::{create_router, AppState, RecommendationSettings},
    services::TmdbPosterProvider,
    store::FeatureStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reelmatch_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // A missing or invalid artifact is fatal
    let store = FeatureStore::load(&config.artifact_path)?;
    let posters = TmdbPosterProvider::from_config(&config);

    let state = AppState::new(
        Arc::new(store),
        Arc::new(posters),
        RecommendationSettings::from_config(&config),
    )?;
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
