//! Server-rendered web UI
//!
//! One page: a title selector, a button, and a grid of recommended movies
//! with their posters. Templates are embedded at compile time.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use tera::{Context, Tera};

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::RecommendedMovie,
    routes::AppState,
    services::recommendations::{recommend_with_posters, NOT_FOUND_MESSAGE},
};

const TPL_BASE: &str = include_str!("templates/base.html");
const TPL_INDEX: &str = include_str!("templates/index.html");

/// Builds the template set; `base.html` goes first since `index.html` extends it
pub fn templates() -> AppResult<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_template("base.html", TPL_BASE)?;
    tera.add_raw_template("index.html", TPL_INDEX)?;
    Ok(tera)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/recommend", get(recommend_page))
}

#[derive(Debug, Deserialize)]
pub struct RecommendForm {
    #[serde(default)]
    pub title: String,
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
struct PageView<'a> {
    titles: Vec<&'a str>,
    selected: &'a str,
    top_n: usize,
    columns: usize,
    results: Vec<ResultCard>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct ResultCard {
    title: String,
    poster_url: String,
    placeholder: bool,
}

impl From<RecommendedMovie> for ResultCard {
    fn from(movie: RecommendedMovie) -> Self {
        Self {
            placeholder: movie.poster.is_placeholder(),
            poster_url: movie.poster.url().to_string(),
            title: movie.title,
        }
    }
}

fn render(templates: &Tera, view: &PageView<'_>) -> AppResult<Html<String>> {
    let context = Context::from_serialize(view)?;
    Ok(Html(templates.render("index.html", &context)?))
}

/// Landing page with the title selector and no results
async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let view = PageView {
        titles: state.store.titles(),
        selected: "",
        top_n: state.settings.default_top_n,
        columns: state.settings.grid_columns,
        results: Vec::new(),
        error: None,
    };
    render(&state.templates, &view)
}

/// Runs a lookup for the submitted title and renders the results grid
///
/// A count above the limit re-renders the form with the error and a 400 status.
async fn recommend_page(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(form): Query<RecommendForm>,
) -> AppResult<(StatusCode, Html<String>)> {
    let top_n = match state.settings.resolve_top_n(form.top_n) {
        Ok(top_n) => top_n,
        Err(e) => {
            tracing::warn!(
                request_id = %request_id,
                error = %e,
                "Rejected recommendations page request"
            );
            let view = PageView {
                titles: state.store.titles(),
                selected: &form.title,
                top_n: state.settings.default_top_n,
                columns: state.settings.grid_columns,
                results: Vec::new(),
                error: Some(e.to_string()),
            };
            return Ok((StatusCode::BAD_REQUEST, render(&state.templates, &view)?));
        }
    };

    tracing::info!(
        request_id = %request_id,
        title = %form.title,
        top_n = top_n,
        "Rendering recommendations page"
    );

    let results: Vec<ResultCard> =
        recommend_with_posters(&state.store, state.posters.as_ref(), &form.title, top_n)
            .await
            .into_iter()
            .map(ResultCard::from)
            .collect();

    let error = results
        .is_empty()
        .then(|| NOT_FOUND_MESSAGE.to_string());

    let view = PageView {
        titles: state.store.titles(),
        selected: &form.title,
        top_n,
        columns: state.settings.grid_columns,
        results,
        error,
    };
    Ok((StatusCode::OK, render(&state.templates, &view)?))
}
