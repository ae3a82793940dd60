use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use watchlist_config::CatalogConfig;
use watchlist_models::CatalogCandidate;

use crate::error::CatalogError;

#[derive(Debug, Deserialize)]
struct CatalogPage {
    results: Vec<CatalogCandidate>,
}

/// Search the catalog by title.
pub(crate) async fn search_movies(
    client: &Client,
    config: &CatalogConfig,
    query: &str,
) -> Result<Vec<CatalogCandidate>, CatalogError> {
    let url = format!(
        "{}/search/movie?api_key={}&query={}&page=1",
        config.base_url,
        config.api_key,
        urlencoding::encode(query)
    );

    debug!("catalog search: query={:?}", query);
    fetch_page(client, &url).await
}

/// Fetch the fixed "currently popular" page.
pub(crate) async fn popular_movies(
    client: &Client,
    config: &CatalogConfig,
) -> Result<Vec<CatalogCandidate>, CatalogError> {
    let url = format!(
        "{}/movie/popular?api_key={}&language={}&page=1",
        config.base_url, config.api_key, config.language
    );

    debug!("catalog popular page");
    fetch_page(client, &url).await
}

async fn fetch_page(client: &Client, url: &str) -> Result<Vec<CatalogCandidate>, CatalogError> {
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(CatalogError::Status { status, body });
    }

    let body = response.text().await?;
    let page: CatalogPage = serde_json::from_str(&body).map_err(CatalogError::Parse)?;

    debug!("catalog returned {} candidates", page.results.len());
    Ok(page.results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_parses_catalog_result_shape() {
        let body = r#"{
            "page": 1,
            "results": [
                { "id": 438631, "title": "Dune", "poster_path": "/dune.jpg", "vote_average": 7.8 },
                { "id": 693134, "title": "Dune: Part Two", "poster_path": null }
            ],
            "total_pages": 42,
            "total_results": 833
        }"#;

        let page: CatalogPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].title, "Dune");
        assert_eq!(page.results[1].poster_path, None);
    }

    #[test]
    fn test_unexpected_shape_is_a_parse_error() {
        let body = r#"{ "status_code": 7, "status_message": "Invalid API key" }"#;

        let err = serde_json::from_str::<CatalogPage>(body).unwrap_err();
        let err = CatalogError::Parse(err);
        assert!(err.to_string().contains("unexpected catalog response"));
    }
}
