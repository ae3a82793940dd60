use serde::{Deserialize, Serialize};

/// Watch status of a tracked entry. Serialized exactly as stored by the
/// app's persisted payload ("watched" / "not watched").
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WatchStatus {
    #[serde(rename = "watched")]
    Watched,
    #[default]
    #[serde(rename = "not watched")]
    NotWatched,
}

impl WatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchStatus::Watched => "watched",
            WatchStatus::NotWatched => "not watched",
        }
    }
}

impl std::fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "watched" => Ok(WatchStatus::Watched),
            "not watched" | "not-watched" | "unwatched" => Ok(WatchStatus::NotWatched),
            other => Err(format!(
                "invalid watch status: {:?} (expected 'watched' or 'not watched')",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_names() {
        assert_eq!(
            serde_json::to_string(&WatchStatus::Watched).unwrap(),
            "\"watched\""
        );
        assert_eq!(
            serde_json::to_string(&WatchStatus::NotWatched).unwrap(),
            "\"not watched\""
        );

        let parsed: WatchStatus = serde_json::from_str("\"not watched\"").unwrap();
        assert_eq!(parsed, WatchStatus::NotWatched);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("watched".parse::<WatchStatus>().unwrap(), WatchStatus::Watched);
        assert_eq!(
            "not-watched".parse::<WatchStatus>().unwrap(),
            WatchStatus::NotWatched
        );
        assert!("maybe".parse::<WatchStatus>().is_err());
    }
}
