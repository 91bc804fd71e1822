/// TMDB poster provider
///
/// Resolves a poster through `GET /movie/{id}` and joins the returned
/// `poster_path` onto the configured image host, e.g.
/// `https://image.tmdb.org/t/p/w500` + `/kyeqWdyUXW608qlYkRqosgbbJyK.jpg`.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{MovieId, Poster, TmdbMovieDetails},
    services::posters::PosterProvider,
};
use reqwest::Client as HttpClient;

#[derive(Clone)]
pub struct TmdbPosterProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    language: String,
    image_base_url: String,
    placeholder_url: String,
}

impl TmdbPosterProvider {
    pub fn new(
        api_key: Option<String>,
        api_url: String,
        language: String,
        image_base_url: String,
        placeholder_url: String,
    ) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            language,
            image_base_url,
            placeholder_url,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        if config.tmdb_api_key.is_none() {
            tracing::warn!("TMDB_API_KEY is not set; every poster will use the placeholder");
        }

        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_language.clone(),
            config.poster_base_url.clone(),
            config.placeholder_poster_url.clone(),
        )
    }

    fn placeholder(&self) -> Poster {
        Poster::Placeholder {
            url: self.placeholder_url.clone(),
        }
    }

    /// Fetches the poster URL, surfacing every failure as an error
    ///
    /// Transport errors drop their URL since the query string carries the API key.
    #[tracing::instrument(level = "debug", skip(self))]
    async fn lookup(&self, movie_id: MovieId) -> AppResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::ExternalApi("TMDB API key not configured".to_string()))?;

        let url = format!("{}/movie/{}", self.api_url.trim_end_matches('/'), movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key), ("language", self.language.as_str())])
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let details: TmdbMovieDetails = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)?;

        match details.poster_path {
            Some(path) if !path.is_empty() => Ok(format!("{}{}", self.image_base_url, path)),
            _ => Err(AppError::NotFound(format!(
                "TMDB has no poster for movie {}",
                movie_id
            ))),
        }
    }
}

#[async_trait::async_trait]
impl PosterProvider for TmdbPosterProvider {
    async fn fetch_poster(&self, movie_id: MovieId) -> Poster {
        match self.lookup(movie_id).await {
            Ok(url) => {
                tracing::debug!(movie_id = %movie_id, url = %url, "Poster fetched");
                Poster::Remote { url }
            }
            Err(e) => {
                tracing::warn!(
                    movie_id = %movie_id,
                    error = %e,
                    provider = self.name(),
                    "Poster lookup failed, using placeholder"
                );
                self.placeholder()
            }
        }
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const PLACEHOLDER: &str = "https://via.placeholder.com/300x450?text=No+Image";
    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

    fn create_test_provider(api_url: String, api_key: Option<&str>) -> TmdbPosterProvider {
        TmdbPosterProvider::new(
            api_key.map(str::to_string),
            api_url,
            "en-US".to_string(),
            IMAGE_BASE.to_string(),
            PLACEHOLDER.to_string(),
        )
    }

    fn tmdb_query() -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("api_key".into(), "test_key".into()),
            Matcher::UrlEncoded("language".into(), "en-US".into()),
        ])
    }

    #[tokio::test]
    async fn test_poster_path_is_joined_onto_image_host() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/movie/19995")
            .match_query(tmdb_query())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 19995, "poster_path": "/kyeqWdyUXW608qlYkRqosgbbJyK.jpg"}"#)
            .create_async()
            .await;

        let provider = create_test_provider(server.url(), Some("test_key"));
        let poster = provider.fetch_poster(MovieId(19995)).await;

        mock.assert_async().await;
        assert_eq!(
            poster,
            Poster::Remote {
                url: format!("{}/kyeqWdyUXW608qlYkRqosgbbJyK.jpg", IMAGE_BASE)
            }
        );
    }

    #[tokio::test]
    async fn test_missing_poster_path_uses_placeholder() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/movie/1")
            .match_query(tmdb_query())
            .with_status(200)
            .with_body(r#"{"id": 1, "title": "No Art"}"#)
            .create_async()
            .await;

        let provider = create_test_provider(server.url(), Some("test_key"));
        let poster = provider.fetch_poster(MovieId(1)).await;

        assert!(poster.is_placeholder());
        assert_eq!(poster.url(), PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_null_or_empty_poster_path_uses_placeholder() {
        let mut server = Server::new_async().await;
        let _null = server
            .mock("GET", "/movie/2")
            .match_query(tmdb_query())
            .with_status(200)
            .with_body(r#"{"poster_path": null}"#)
            .create_async()
            .await;
        let _empty = server
            .mock("GET", "/movie/3")
            .match_query(tmdb_query())
            .with_status(200)
            .with_body(r#"{"poster_path": ""}"#)
            .create_async()
            .await;

        let provider = create_test_provider(server.url(), Some("test_key"));
        assert_eq!(provider.fetch_poster(MovieId(2)).await.url(), PLACEHOLDER);
        assert_eq!(provider.fetch_poster(MovieId(3)).await.url(), PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_error_status_uses_placeholder() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/movie/4")
            .match_query(tmdb_query())
            .with_status(401)
            .with_body(r#"{"status_message": "Invalid API key"}"#)
            .create_async()
            .await;

        let provider = create_test_provider(server.url(), Some("test_key"));
        let poster = provider.fetch_poster(MovieId(4)).await;

        assert_eq!(
            poster,
            Poster::Placeholder {
                url: PLACEHOLDER.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_body_uses_placeholder() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/movie/5")
            .match_query(tmdb_query())
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let provider = create_test_provider(server.url(), Some("test_key"));
        assert_eq!(provider.fetch_poster(MovieId(5)).await.url(), PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_unreachable_host_uses_placeholder() {
        // Nothing listens on port 1
        let provider = create_test_provider("http://127.0.0.1:1".to_string(), Some("test_key"));
        let poster = provider.fetch_poster(MovieId(6)).await;

        assert_eq!(poster.url(), PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_transport_error_does_not_leak_api_key() {
        let provider =
            create_test_provider("http://127.0.0.1:1".to_string(), Some("SECRET_KEY_123"));
        let err = provider.lookup(MovieId(6)).await.unwrap_err();

        assert!(matches!(err, AppError::HttpClient(_)));
        assert!(!err.to_string().contains("SECRET_KEY_123"));
        assert!(!format!("{:?}", err).contains("SECRET_KEY_123"));
    }

    #[tokio::test]
    async fn test_decode_error_does_not_leak_api_key() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/movie/8")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let provider = create_test_provider(server.url(), Some("SECRET_KEY_123"));
        let err = provider.lookup(MovieId(8)).await.unwrap_err();

        assert!(!err.to_string().contains("SECRET_KEY_123"));
        assert!(!format!("{:?}", err).contains("SECRET_KEY_123"));
    }

    #[test]
    fn test_missing_api_key_skips_request() {
        let provider = create_test_provider("http://127.0.0.1:1".to_string(), None);
        let poster = tokio_test::block_on(provider.fetch_poster(MovieId(7)));

        assert!(poster.is_placeholder());
    }

    #[test]
    fn test_provider_name() {
        let provider = create_test_provider("http://localhost".to_string(), None);
        assert_eq!(provider.name(), "tmdb");
    }
}
