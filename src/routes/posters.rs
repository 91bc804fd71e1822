use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    models::{MovieId, Poster},
    routes::AppState,
};

/// Handler exposing a single poster lookup, including whether it fell back
pub async fn poster(State(state): State<AppState>, Path(id): Path<u64>) -> Json<Poster> {
    Json(state.posters.fetch_poster(MovieId(id)).await)
}
