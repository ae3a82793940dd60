pub mod config;
pub mod paths;

pub use config::{CatalogConfig, Config, SearchOptions, PLACEHOLDER_API_KEY};
pub use paths::PathManager;
