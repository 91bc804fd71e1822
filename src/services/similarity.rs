use crate::{
    models::ScoredMovie,
    store::{cosine_similarity, FeatureStore},
};

/// Finds the `top_n` titles most similar to `title`
///
/// The title must match exactly; unknown titles yield an empty list. Every row is
/// scored against the query row with cosine similarity and the rows are sorted by
/// descending score. The sort is stable, so equal scores keep ascending row order.
/// The query row itself and rows with no item record are never returned.
#[tracing::instrument(level = "debug", skip(store))]
pub fn recommend(store: &FeatureStore, title: &str, top_n: usize) -> Vec<ScoredMovie> {
    if top_n == 0 || store.len() < 2 {
        return Vec::new();
    }

    let Some(query_row) = store.resolve(title) else {
        tracing::debug!(title = %title, "Title not in feature store");
        return Vec::new();
    };
    let Some(query) = store.row(query_row) else {
        return Vec::new();
    };

    let mut scores: Vec<(usize, f64)> = store
        .rows()
        .iter()
        .enumerate()
        .map(|(row, vector)| (row, cosine_similarity(query, vector)))
        .collect();

    scores.sort_by(|a, b| b.1.total_cmp(&a.1));

    scores
        .into_iter()
        .filter(|&(row, _)| row != query_row)
        .filter_map(|(row, score)| {
            store.movie(row).map(|movie| ScoredMovie {
                movie: movie.clone(),
                score,
                row,
            })
        })
        .take(top_n)
        .collect()
}
