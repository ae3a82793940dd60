use async_trait::async_trait;
use watchlist_models::CatalogCandidate;

use crate::error::CatalogError;

/// Read-only view of the remote movie catalog.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Search candidate titles. Queries below the minimum length resolve to
    /// an empty list without touching the network.
    async fn search(&self, query: &str) -> Result<Vec<CatalogCandidate>, CatalogError>;

    /// Fetch the catalog's current "popular" page.
    async fn list_popular(&self) -> Result<Vec<CatalogCandidate>, CatalogError>;

    /// Absolute URL for a candidate's relative poster path.
    fn poster_url(&self, poster_path: &str) -> String;
}
