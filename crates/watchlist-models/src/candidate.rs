use serde::{Deserialize, Serialize};

/// A search result from the remote movie catalog. Transient: lives for the
/// duration of one search response and is discarded once an entry is created
/// or the form closes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogCandidate {
    pub id: u64,
    pub title: String,
    /// Relative poster path as returned by the catalog. Resolved against the
    /// configured image base URL only when the candidate is selected.
    pub poster_path: Option<String>,
    pub vote_average: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_parses_catalog_payload() {
        let json = r#"{
            "id": 438631,
            "title": "Dune",
            "poster_path": "/d5NXSklXo0qyIYkgV94XAgMIckC.jpg",
            "vote_average": 7.8,
            "overview": "ignored extra field"
        }"#;

        let candidate: CatalogCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.id, 438631);
        assert_eq!(candidate.title, "Dune");
        assert_eq!(
            candidate.poster_path.as_deref(),
            Some("/d5NXSklXo0qyIYkgV94XAgMIckC.jpg")
        );
        assert_eq!(candidate.vote_average, Some(7.8));
    }

    #[test]
    fn test_candidate_tolerates_null_poster_and_missing_rating() {
        let json = r#"{ "id": 1, "title": "Obscure Short", "poster_path": null }"#;

        let candidate: CatalogCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.poster_path, None);
        assert_eq!(candidate.vote_average, None);
    }
}
