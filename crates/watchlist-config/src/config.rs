use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder written into freshly generated config files; validation
/// treats it the same as an empty key.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchOptions,
}

/// Connection details for the remote movie catalog. The key is injected into
/// the client at construction; nothing reads it from global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Queries shorter than this never reach the network.
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
    /// Quiet period before a typed query is dispatched.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w200".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_min_query_chars() -> usize {
    3
}

fn default_debounce_ms() -> u64 {
    500
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: PLACEHOLDER_API_KEY.to_string(),
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            language: default_language(),
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_query_chars: default_min_query_chars(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            search: SearchOptions::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.is_catalog_configured() {
            return Err(anyhow::anyhow!(
                "Catalog api_key is not configured. Run 'reelist config catalog' to set it."
            ));
        }
        if self.catalog.base_url.is_empty() {
            return Err(anyhow::anyhow!("catalog.base_url cannot be empty"));
        }
        if self.catalog.image_base_url.is_empty() {
            return Err(anyhow::anyhow!("catalog.image_base_url cannot be empty"));
        }
        if self.search.min_query_chars == 0 {
            return Err(anyhow::anyhow!("search.min_query_chars must be at least 1"));
        }
        Ok(())
    }

    pub fn is_catalog_configured(&self) -> bool {
        !self.catalog.api_key.is_empty() && self.catalog.api_key != PLACEHOLDER_API_KEY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            catalog: CatalogConfig {
                api_key: "test_key".to_string(),
                ..CatalogConfig::default()
            },
            search: SearchOptions::default(),
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.catalog.api_key, "test_key");
        assert_eq!(loaded.catalog.base_url, "https://api.themoviedb.org/3");
        assert_eq!(loaded.search.min_query_chars, 3);
        assert_eq!(loaded.search.debounce_ms, 500);
    }

    #[test]
    fn test_config_defaults_fill_missing_sections() {
        let parsed: Config = toml::from_str("[catalog]\napi_key = \"abc123\"\n").unwrap();
        assert_eq!(parsed.catalog.language, "en-US");
        assert_eq!(parsed.catalog.image_base_url, "https://image.tmdb.org/t/p/w200");
        assert_eq!(parsed.search.debounce_ms, 500);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_err());
        assert!(!config.is_catalog_configured());

        config.catalog.api_key = "real_key".to_string();
        assert!(config.validate().is_ok());
        assert!(config.is_catalog_configured());

        config.search.min_query_chars = 0;
        assert!(config.validate().is_err());
    }
}
