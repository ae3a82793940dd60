pub mod debounce;
pub mod flow;
pub mod store;

pub use debounce::{Debouncer, SearchOutcome};
pub use flow::{AddEntryFlow, EntryDraft, FlowState};
pub use store::{StoreError, WatchlistStore};
