use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the serialized feature store artifact
    #[serde(default = "default_artifact_path")]
    pub artifact_path: String,

    /// TMDB API key. Without it every poster falls back to the placeholder.
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Language passed to TMDB metadata lookups
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Image host prefix prepended to TMDB poster paths
    #[serde(default = "default_poster_base_url")]
    pub poster_base_url: String,

    /// Image shown when no poster could be fetched
    #[serde(default = "default_placeholder_poster_url")]
    pub placeholder_poster_url: String,

    /// Number of recommendations when the request does not ask for a count
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,

    /// Upper bound on requested recommendations (each one costs a poster fetch)
    #[serde(default = "default_max_top_n")]
    pub max_top_n: usize,

    /// Column count of the results grid in the web UI
    #[serde(default = "default_grid_columns")]
    pub grid_columns: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_artifact_path() -> String {
    "model.json".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_language() -> String {
    "en-US".to_string()
}

fn default_poster_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_placeholder_poster_url() -> String {
    "https://via.placeholder.com/300x450?text=No+Image".to_string()
}

fn default_top_n() -> usize {
    10
}

fn default_max_top_n() -> usize {
    50
}

fn default_grid_columns() -> usize {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs (environment variable names)
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.default_top_n > config.max_top_n {
            anyhow::bail!(
                "DEFAULT_TOP_N ({}) must not exceed MAX_TOP_N ({})",
                config.default_top_n,
                config.max_top_n
            );
        }
        if config.grid_columns == 0 {
            anyhow::bail!("GRID_COLUMNS must be at least 1");
        }

        Ok(config)
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
