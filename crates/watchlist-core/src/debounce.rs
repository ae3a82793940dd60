use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;
use watchlist_catalog::{CatalogError, MovieCatalog};
use watchlist_models::CatalogCandidate;

/// Completion of one dispatched search.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Sequence number assigned when the search was scheduled. Monotonically
    /// increasing; only the latest dispatched number is current.
    pub seq: u64,
    pub query: String,
    pub result: Result<Vec<CatalogCandidate>, CatalogError>,
}

/// Debounce over catalog searches: each new query cancels the previous
/// quiet-period timer, so at most one timer is pending at a time. A request
/// already dispatched is never cancelled; completions carry a sequence number
/// and stale ones are dropped by the receiver.
pub struct Debouncer {
    catalog: Arc<dyn MovieCatalog>,
    delay: Duration,
    seq: u64,
    timer: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<SearchOutcome>,
}

impl Debouncer {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        delay: Duration,
        tx: mpsc::UnboundedSender<SearchOutcome>,
    ) -> Self {
        Self {
            catalog,
            delay,
            seq: 0,
            timer: None,
            tx,
        }
    }

    /// Schedule a search for `query` after the quiet period, cancelling any
    /// previously scheduled but not yet dispatched search.
    pub fn submit(&mut self, query: &str) -> u64 {
        self.seq += 1;
        let seq = self.seq;

        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        let catalog = Arc::clone(&self.catalog);
        let tx = self.tx.clone();
        let delay = self.delay;
        let query = query.to_string();

        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Quiet period elapsed. The request runs detached so that
            // aborting the timer never cancels an in-flight call.
            tokio::spawn(async move {
                let result = catalog.search(&query).await;
                let _ = tx.send(SearchOutcome { seq, query, result });
            });
        }));

        seq
    }

    /// Latest dispatched sequence number.
    pub fn latest(&self) -> u64 {
        self.seq
    }

    pub fn is_stale(&self, seq: u64) -> bool {
        seq != self.seq
    }

    /// Abort the pending quiet-period timer, if any.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            debug!("cancelled pending search timer");
        }
    }
}
