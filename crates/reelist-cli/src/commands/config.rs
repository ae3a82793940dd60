use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::Password;
use serde_json::json;
use watchlist_config::{Config, PathManager};

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::Catalog { api_key, language } => {
            configure_catalog(api_key, language, output)
        }
    }
}

/// Load and validate the configuration for commands that talk to the
/// catalog.
pub(crate) fn load_config(paths: &PathManager) -> Result<Config> {
    let path = paths.config_file();
    if !path.exists() {
        return Err(eyre!(
            "No configuration at {}. Run 'reelist config catalog' to set your catalog API key.",
            path.display()
        ));
    }

    let config =
        Config::load_from_file(&path).map_err(|e| eyre!("Failed to load configuration: {}", e))?;
    config.validate().map_err(|e| eyre!("{}", e))?;
    Ok(config)
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let path = paths.config_file();

    if !path.exists() {
        output.warn(format!(
            "No configuration at {}. Run 'reelist config catalog' to create one.",
            path.display()
        ));
        return Ok(());
    }

    let config =
        Config::load_from_file(&path).map_err(|e| eyre!("Failed to load configuration: {}", e))?;
    let api_key = mask_key(&config.catalog.api_key, full);

    if matches!(output.format(), OutputFormat::Json | OutputFormat::JsonPretty) {
        output.json(&json!({
            "catalog": {
                "api_key": api_key,
                "base_url": config.catalog.base_url,
                "image_base_url": config.catalog.image_base_url,
                "language": config.catalog.language,
            },
            "search": {
                "min_query_chars": config.search.min_query_chars,
                "debounce_ms": config.search.debounce_ms,
            },
        }));
        return Ok(());
    }

    output.println(format!("Configuration ({})", path.display()));
    output.println(format!("  catalog.api_key        = {}", api_key));
    output.println(format!("  catalog.base_url       = {}", config.catalog.base_url));
    output.println(format!(
        "  catalog.image_base_url = {}",
        config.catalog.image_base_url
    ));
    output.println(format!("  catalog.language       = {}", config.catalog.language));
    output.println(format!(
        "  search.min_query_chars = {}",
        config.search.min_query_chars
    ));
    output.println(format!(
        "  search.debounce_ms     = {}",
        config.search.debounce_ms
    ));
    Ok(())
}

fn configure_catalog(
    api_key: Option<String>,
    language: Option<String>,
    output: &Output,
) -> Result<()> {
    let paths = PathManager::default();
    paths.ensure_directories().map_err(|e| eyre!("{}", e))?;
    let path = paths.config_file();

    let mut config = if path.exists() {
        Config::load_from_file(&path).map_err(|e| eyre!("Failed to load configuration: {}", e))?
    } else {
        Config::default()
    };

    config.catalog.api_key = match api_key {
        Some(key) => key,
        None => Password::new().with_prompt("Catalog API key").interact()?,
    };

    if let Some(language) = language {
        config.catalog.language = language;
    }

    config.validate().map_err(|e| eyre!("{}", e))?;
    config
        .save_to_file(&path)
        .map_err(|e| eyre!("Failed to save configuration: {}", e))?;

    output.success(format!("Catalog configuration saved to {}", path.display()));
    Ok(())
}

fn mask_key(key: &str, full: bool) -> String {
    if full {
        return key.to_string();
    }
    if key.chars().count() <= 4 {
        return "****".to_string();
    }
    let head: String = key.chars().take(4).collect();
    format!("{}{}", head, "*".repeat(key.chars().count() - 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key_keeps_prefix_only() {
        assert_eq!(mask_key("03a96c70", false), "03a9****");
        assert_eq!(mask_key("abc", false), "****");
        assert_eq!(mask_key("03a96c70", true), "03a96c70");
    }
}
