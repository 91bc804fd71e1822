use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::RecommendedMovie,
    routes::AppState,
    services::recommendations::{recommend_with_posters, NOT_FOUND_MESSAGE},
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub title: String,
    pub recommendations: Vec<RecommendedMovie>,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let top_n = state.settings.resolve_top_n(query.top_n)?;

    tracing::info!(
        request_id = %request_id,
        title = %query.title,
        top_n = top_n,
        "Processing recommendation request"
    );

    let recommendations =
        recommend_with_posters(&state.store, state.posters.as_ref(), &query.title, top_n).await;

    if recommendations.is_empty() {
        return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }

    Ok(Json(RecommendationResponse {
        title: query.title,
        recommendations,
    }))
}
