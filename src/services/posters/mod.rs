//! Poster providers
//!
//! Recommendations are decorated with a poster image looked up by movie id.
//! Providers never fail: when a lookup goes wrong they hand back a
//! [`Poster::Placeholder`] so rendering can always proceed.

use crate::models::{MovieId, Poster};

pub mod tmdb;

pub use tmdb::TmdbPosterProvider;

/// Source of poster images for movies
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Looks up the poster for a movie, falling back to a placeholder on any failure
    ///
    /// Makes at most one outbound request and never retries.
    async fn fetch_poster(&self, movie_id: MovieId) -> Poster;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
