use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use watchlist_config::{CatalogConfig, SearchOptions};
use watchlist_models::CatalogCandidate;

use crate::api;
use crate::error::CatalogError;
use crate::traits::MovieCatalog;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for the remote movie catalog. The API key and endpoints are
/// injected at construction and scoped to this instance.
pub struct CatalogClient {
    http: Client,
    config: CatalogConfig,
    min_query_chars: usize,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig, search: &SearchOptions) -> Result<Self, CatalogError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            config,
            min_query_chars: search.min_query_chars,
        })
    }
}

#[async_trait]
impl MovieCatalog for CatalogClient {
    async fn search(&self, query: &str) -> Result<Vec<CatalogCandidate>, CatalogError> {
        // Guard against noisy low-value queries; no request is issued.
        if query.chars().count() < self.min_query_chars {
            debug!(
                "query {:?} shorter than {} characters, skipping catalog request",
                query, self.min_query_chars
            );
            return Ok(Vec::new());
        }

        api::search_movies(&self.http, &self.config, query).await
    }

    async fn list_popular(&self) -> Result<Vec<CatalogCandidate>, CatalogError> {
        api::popular_movies(&self.http, &self.config).await
    }

    fn poster_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.config.image_base_url, poster_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens here; any issued request fails immediately with a
    // connection error, so a successful empty result proves no call was made.
    fn unreachable_client() -> CatalogClient {
        let config = CatalogConfig {
            api_key: "test_key".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            image_base_url: "https://image.tmdb.org/t/p/w200".to_string(),
            language: "en-US".to_string(),
        };
        CatalogClient::new(config, &SearchOptions::default()).unwrap()
    }

    #[tokio::test]
    async fn test_short_query_returns_empty_without_network() {
        let client = unreachable_client();

        let results = client.search("du").await.unwrap();
        assert!(results.is_empty());

        let results = client.search("").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_query_at_threshold_issues_a_request() {
        let client = unreachable_client();

        // Three characters clears the guard; the unreachable endpoint turns
        // the attempted request into a network error.
        let err = client.search("dun").await.unwrap_err();
        assert!(matches!(err, CatalogError::Network(_)));
    }

    #[test]
    fn test_poster_url_joins_base_and_path() {
        let client = unreachable_client();
        assert_eq!(
            client.poster_url("/dune.jpg"),
            "https://image.tmdb.org/t/p/w200/dune.jpg"
        );
    }
}
