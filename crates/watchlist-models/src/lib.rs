pub mod candidate;
pub mod entry;
pub mod status;

pub use candidate::CatalogCandidate;
pub use entry::{NewEntry, WatchlistEntry};
pub use status::WatchStatus;
