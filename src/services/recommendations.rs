use crate::{
    models::RecommendedMovie,
    services::{posters::PosterProvider, similarity},
    store::FeatureStore,
};

/// Shown when a title is unknown or has no neighbours
pub const NOT_FOUND_MESSAGE: &str = "Movie not found or no similar movies available.";

/// Looks up similar titles and decorates each one with its poster
///
/// Posters are fetched one at a time, in ranking order. An unknown title
/// yields an empty list without touching the poster provider.
pub async fn recommend_with_posters(
    store: &FeatureStore,
    posters: &dyn PosterProvider,
    title: &str,
    top_n: usize,
) -> Vec<RecommendedMovie> {
    let matches = similarity::recommend(store, title, top_n);

    let mut recommendations = Vec::with_capacity(matches.len());
    for scored in matches {
        let poster = posters.fetch_poster(scored.movie.id).await;
        recommendations.push(RecommendedMovie::new(scored, poster));
    }

    tracing::info!(
        title = %title,
        top_n = top_n,
        results = recommendations.len(),
        placeholders = recommendations.iter().filter(|r| r.poster.is_placeholder()).count(),
        provider = posters.name(),
        "Recommendations computed"
    );

    recommendations
}
