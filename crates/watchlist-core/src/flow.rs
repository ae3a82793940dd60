use chrono::{Local, NaiveDate};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;
use watchlist_catalog::{CatalogError, MovieCatalog};
use watchlist_config::SearchOptions;
use watchlist_models::{CatalogCandidate, NewEntry, WatchStatus, WatchlistEntry};

use crate::debounce::{Debouncer, SearchOutcome};
use crate::store::{StoreError, WatchlistStore};

/// Stand-in poster for a selected candidate that has none of its own.
pub const POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/50";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Form closed.
    Idle,
    /// Text entry; zero or more debounced searches may be in flight.
    Editing,
    /// Candidate list shown, awaiting a selection or further typing.
    Reviewing,
    /// Explicit add in progress.
    Submitting,
}

/// Local form state assembled into a `NewEntry` on submission.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub title: String,
    pub status: WatchStatus,
    pub date: NaiveDate,
    pub poster_url: Option<String>,
}

impl EntryDraft {
    fn empty(date: NaiveDate) -> Self {
        Self {
            title: String::new(),
            status: WatchStatus::default(),
            date,
            poster_url: None,
        }
    }
}

/// Coordinates keystroke-driven catalog search with debounced timing and
/// assembles one finished entry for the store.
///
/// State machine: Idle -> Editing -> Reviewing -> (Editing | Submitting) ->
/// Idle. Cancel is reachable from any non-Idle state and persists nothing.
pub struct AddEntryFlow {
    catalog: Arc<dyn MovieCatalog>,
    store: WatchlistStore,
    debouncer: Debouncer,
    outcomes: mpsc::UnboundedReceiver<SearchOutcome>,
    state: FlowState,
    draft: EntryDraft,
    candidates: Vec<CatalogCandidate>,
}

impl AddEntryFlow {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        store: WatchlistStore,
        options: &SearchOptions,
    ) -> Self {
        let (tx, outcomes) = mpsc::unbounded_channel();
        let debouncer = Debouncer::new(
            Arc::clone(&catalog),
            Duration::from_millis(options.debounce_ms),
            tx,
        );

        Self {
            catalog,
            store,
            debouncer,
            outcomes,
            state: FlowState::Idle,
            draft: EntryDraft::empty(today()),
            candidates: Vec::new(),
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }

    pub fn candidates(&self) -> &[CatalogCandidate] {
        &self.candidates
    }

    /// Open the form with a fresh draft.
    pub fn open(&mut self) {
        self.draft = EntryDraft::empty(today());
        self.candidates.clear();
        self.state = FlowState::Editing;
    }

    /// Text change in the title field. Schedules a debounced search and
    /// returns its sequence number.
    pub fn input(&mut self, text: &str) -> u64 {
        self.draft.title = text.to_string();
        self.state = FlowState::Editing;
        self.debouncer.submit(text)
    }

    /// Wait for the next search completion and fold it into the flow.
    /// `Ok(true)` means fresh results were applied; `Ok(false)` means a stale
    /// completion was discarded (or the channel closed).
    pub async fn await_results(&mut self) -> Result<bool, CatalogError> {
        match self.outcomes.recv().await {
            Some(outcome) => self.apply_outcome(outcome),
            None => Ok(false),
        }
    }

    /// Fold one search completion into the flow. Anything that is not the
    /// latest dispatched query is dropped regardless of arrival order.
    pub fn apply_outcome(&mut self, outcome: SearchOutcome) -> Result<bool, CatalogError> {
        if self.debouncer.is_stale(outcome.seq) {
            debug!(
                "discarding stale results for {:?} (seq {}, latest {})",
                outcome.query,
                outcome.seq,
                self.debouncer.latest()
            );
            return Ok(false);
        }

        self.candidates = outcome.result?;
        self.state = if self.candidates.is_empty() {
            FlowState::Editing
        } else {
            FlowState::Reviewing
        };
        Ok(true)
    }

    /// Fix the draft title and poster from the chosen candidate and close
    /// the candidate list. The flow then waits for explicit submission.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(candidate) = self.candidates.get(index) else {
            return false;
        };

        self.draft.title = candidate.title.clone();
        self.draft.poster_url = Some(match &candidate.poster_path {
            Some(path) => self.catalog.poster_url(path),
            None => POSTER_PLACEHOLDER.to_string(),
        });
        self.candidates.clear();
        self.state = FlowState::Editing;
        true
    }

    pub fn set_status(&mut self, status: WatchStatus) {
        self.draft.status = status;
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.draft.date = date;
    }

    /// Assemble the draft into a `NewEntry` and hand it to the store. On
    /// success the flow resets and closes; on a write failure the draft is
    /// preserved so the caller can retry.
    pub fn submit(&mut self) -> Result<WatchlistEntry, StoreError> {
        self.state = FlowState::Submitting;

        let entry = NewEntry {
            title: self.draft.title.clone(),
            status: self.draft.status,
            date: self.draft.date,
            poster_url: self.draft.poster_url.clone(),
        };

        match self.store.append(entry) {
            Ok(stored) => {
                self.reset();
                Ok(stored)
            }
            Err(e) => {
                self.state = FlowState::Editing;
                Err(e)
            }
        }
    }

    /// Abandon the flow from any state without persisting anything.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
        self.reset();
    }

    fn reset(&mut self) {
        self.draft = EntryDraft::empty(today());
        self.candidates.clear();
        self.state = FlowState::Idle;
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
