use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::Poster;

/// TMDB movie identifier, used to look up metadata such as posters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the item table: display title plus external identifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
}

#[cfg(test)]
impl Movie {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: MovieId(id),
            title: title.into(),
        }
    }
}

/// A similarity match for a query title
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredMovie {
    pub movie: Movie,
    /// Cosine similarity to the query row, in [-1, 1]
    pub score: f64,
    /// Row position in the feature matrix
    pub row: usize,
}

/// A similarity match decorated with its poster, ready to render
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendedMovie {
    pub id: MovieId,
    pub title: String,
    pub score: f64,
    pub poster: Poster,
}

impl RecommendedMovie {
    pub fn new(scored: ScoredMovie, poster: Poster) -> Self {
        Self {
            id: scored.movie.id,
            title: scored.movie.title,
            score: scored.score,
            poster,
        }
    }
}
