use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    middleware::{make_span_with_request_id, request_id_middleware},
    web,
};

pub mod posters;
pub mod recommendations;
pub mod state;
pub mod titles;

pub use state::{AppState, RecommendationSettings};

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(web::routes())
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/titles", get(titles::list))
        .route("/recommendations", get(recommendations::recommend))
        .route("/movies/:id/poster", get(posters::poster))
}

/// Health check endpoint, reporting the shape of the loaded store
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let store = &state.store;
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "movies": store.movies().len(),
            "rows": store.len(),
            "dimensions": store.dimensions(),
            "loaded_at": store.loaded_at(),
        })),
    )
}
