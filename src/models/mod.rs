pub mod movie;
pub mod poster;

pub use movie::{Movie, MovieId, RecommendedMovie, ScoredMovie};
pub use poster::{Poster, TmdbMovieDetails};
