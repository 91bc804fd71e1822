use serde::{Deserialize, Serialize};

/// Outcome of a poster lookup
///
/// Both variants carry a displayable URL; the variant tells callers whether the
/// metadata service actually supplied an image or the placeholder was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Poster {
    /// Image URL built from the metadata service's poster path
    Remote { url: String },
    /// Fallback image used when the lookup failed or returned no poster
    Placeholder { url: String },
}

impl Poster {
    /// URL to display, regardless of where it came from
    pub fn url(&self) -> &str {
        match self {
            Poster::Remote { url } | Poster::Placeholder { url } => url,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Poster::Placeholder { .. })
    }
}

/// Subset of TMDB's `GET /movie/{id}` response we care about
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub poster_path: Option<String>,
}
