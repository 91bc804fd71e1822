pub mod posters;
pub mod recommendations;
pub mod similarity;

pub use posters::{PosterProvider, TmdbPosterProvider};
