use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::status::WatchStatus;

/// One tracked movie in the persisted watchlist.
///
/// The id is assigned by the store at append time (derived from the creation
/// timestamp) and is unique within the stored list. No other uniqueness or
/// referential constraint exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    pub id: String,
    pub title: String,
    pub status: WatchStatus,
    /// Calendar date associated with the entry, ISO-formatted on disk.
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

/// A finished entry as assembled by the add flow, before the store has
/// assigned it an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub title: String,
    pub status: WatchStatus,
    pub date: NaiveDate,
    pub poster_url: Option<String>,
}

impl NewEntry {
    pub fn into_entry(self, id: String) -> WatchlistEntry {
        WatchlistEntry {
            id,
            title: self.title,
            status: self.status,
            date: self.date,
            poster_url: self.poster_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_round_trips_through_json() {
        let entry = WatchlistEntry {
            id: "1709251200000".to_string(),
            title: "Dune".to_string(),
            status: WatchStatus::Watched,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            poster_url: Some("https://image.tmdb.org/t/p/w200/dune.jpg".to_string()),
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"2024-03-01\""));
        assert!(json.contains("\"watched\""));

        let back: WatchlistEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_missing_poster_is_omitted() {
        let entry = WatchlistEntry {
            id: "1".to_string(),
            title: "Stalker".to_string(),
            status: WatchStatus::NotWatched,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            poster_url: None,
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("poster_url"));

        let back: WatchlistEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.poster_url, None);
    }
}
