use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use watchlist_config::PathManager;
use watchlist_models::{NewEntry, WatchlistEntry};

/// Current on-disk document version.
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read watchlist at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write watchlist at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize watchlist: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct WatchlistDocument {
    version: u32,
    entries: Vec<WatchlistEntry>,
}

/// Exclusive owner of the persisted watchlist: one JSON document, read
/// wholesale and replaced wholesale on every mutation. Safe without locking
/// because the application is single-user and effectively single-writer.
#[derive(Clone)]
pub struct WatchlistStore {
    path: PathBuf,
}

impl WatchlistStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn from_paths(paths: &PathManager) -> Self {
        Self::new(paths.watchlist_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the ordered list of persisted entries.
    ///
    /// A missing file is an empty list. A payload that parses as neither the
    /// versioned document nor the legacy bare array is backed up and treated
    /// as empty rather than crashing the caller.
    pub fn load(&self) -> Result<Vec<WatchlistEntry>, StoreError> {
        if !self.path.exists() {
            debug!("watchlist file does not exist, starting empty");
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        match parse_document(&content) {
            Some(entries) => {
                debug!("loaded {} watchlist entries", entries.len());
                Ok(entries)
            }
            None => {
                // Keep the unreadable payload around for inspection.
                let backup = self.path.with_extension("json.bak");
                match std::fs::copy(&self.path, &backup) {
                    Ok(_) => warn!(
                        "watchlist file is malformed; backed up to {:?} and starting empty",
                        backup
                    ),
                    Err(e) => warn!(
                        "watchlist file is malformed and could not be backed up: {}",
                        e
                    ),
                }
                Ok(Vec::new())
            }
        }
    }

    /// Assign a fresh unique id, append, and replace the stored document.
    /// Returns the stored entry so callers can reload their view.
    pub fn append(&self, entry: NewEntry) -> Result<WatchlistEntry, StoreError> {
        let mut entries = self.load()?;
        let entry = entry.into_entry(next_id(&entries));
        entries.push(entry.clone());
        self.write_all(&entries)?;
        debug!("appended entry {} ({:?})", entry.id, entry.title);
        Ok(entry)
    }

    /// Rewrite the list without the matching entry. Returns whether anything
    /// was removed.
    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut entries = self.load()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.write_all(&entries)?;
        debug!("removed entry {}", id);
        Ok(true)
    }

    fn write_all(&self, entries: &[WatchlistEntry]) -> Result<(), StoreError> {
        let document = WatchlistDocument {
            version: FORMAT_VERSION,
            entries: entries.to_vec(),
        };
        let json = serde_json::to_string_pretty(&document)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        // Atomic replace: write to a temp file, then rename. The last
        // successful write is the durable state.
        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        std::fs::rename(&temp, &self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

fn parse_document(content: &str) -> Option<Vec<WatchlistEntry>> {
    if let Ok(document) = serde_json::from_str::<WatchlistDocument>(content) {
        if document.version == FORMAT_VERSION {
            return Some(document.entries);
        }
        warn!(
            "watchlist file has unsupported version {}",
            document.version
        );
        return None;
    }

    // Early releases stored a bare array; accept and convert on load.
    serde_json::from_str::<Vec<WatchlistEntry>>(content).ok()
}

/// Ids derive from the creation timestamp in milliseconds, bumped until
/// unique so two appends in the same millisecond cannot collide.
fn next_id(existing: &[WatchlistEntry]) -> String {
    let mut candidate = chrono::Utc::now().timestamp_millis();
    while existing.iter().any(|e| e.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use watchlist_models::WatchStatus;

    fn temp_store(dir: &tempfile::TempDir) -> WatchlistStore {
        WatchlistStore::new(dir.path().join("watchlist.json"))
    }

    fn dune() -> NewEntry {
        NewEntry {
            title: "Dune".to_string(),
            status: WatchStatus::Watched,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            poster_url: Some("https://image.tmdb.org/t/p/w200/dune.jpg".to_string()),
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_append_then_load_preserves_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        let before = store.load().unwrap().len();
        let stored = store.append(dune()).unwrap();

        let entries = store.load().unwrap();
        assert_eq!(entries.len(), before + 1);

        let entry = entries.last().unwrap();
        assert_eq!(entry.id, stored.id);
        assert_eq!(entry.title, "Dune");
        assert_eq!(entry.status, WatchStatus::Watched);
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(
            entry.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w200/dune.jpg")
        );
    }

    #[test]
    fn test_appends_assign_distinct_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        // Back-to-back appends land in the same millisecond often enough to
        // exercise the bump-until-unique path.
        for _ in 0..5 {
            store.append(dune()).unwrap();
        }

        let entries = store.load().unwrap();
        let mut ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), entries.len());
    }

    #[test]
    fn test_load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);
        store.append(dune()).unwrap();

        let first = store.load().unwrap();
        let second = store.load().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_payload_loads_empty_and_backs_up() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().unwrap().is_empty());
        assert!(dir.path().join("watchlist.json.bak").exists());
    }

    #[test]
    fn test_unsupported_version_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        std::fs::write(store.path(), r#"{ "version": 99, "entries": [] }"#).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_legacy_bare_array_is_converted() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        let legacy = r#"[
            { "id": "1700000000000", "title": "Stalker", "status": "not watched", "date": "2023-11-14" }
        ]"#;
        std::fs::write(store.path(), legacy).unwrap();

        let entries = store.load().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Stalker");

        // The next write upgrades the document to the versioned shape.
        store.append(dune()).unwrap();
        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("\"version\""));
    }

    #[test]
    fn test_remove_rewrites_without_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        let stored = store.append(dune()).unwrap();
        store.append(dune()).unwrap();

        assert!(store.remove(&stored.id).unwrap());
        let entries = store.load().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries.iter().all(|e| e.id != stored.id));

        assert!(!store.remove("no-such-id").unwrap());
    }
}
