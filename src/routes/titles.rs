use axum::{extract::State, Json};

use crate::routes::AppState;

/// Handler listing every selectable title
pub async fn list(State(state): State<AppState>) -> Json<Vec<String>> {
    let titles = state
        .store
        .titles()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(titles)
}
