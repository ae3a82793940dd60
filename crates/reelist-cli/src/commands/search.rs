use crate::commands::config::load_config;
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use watchlist_catalog::{CatalogClient, MovieCatalog};
use watchlist_config::PathManager;
use watchlist_models::CatalogCandidate;

pub async fn run_search(query: String, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = load_config(&paths)?;

    if query.chars().count() < config.search.min_query_chars {
        output.warn(format!(
            "Queries shorter than {} characters are not sent to the catalog",
            config.search.min_query_chars
        ));
        return Ok(());
    }

    let client =
        CatalogClient::new(config.catalog.clone(), &config.search).map_err(|e| eyre!("{}", e))?;

    let bar = super::spinner(output, "Searching the catalog...");
    let result = client.search(&query).await;
    bar.finish_and_clear();

    match result {
        Ok(candidates) => {
            if candidates.is_empty() {
                output.info(format!("No catalog matches for {:?}", query));
            } else {
                render_candidates(&candidates, output)?;
            }
        }
        Err(e) => {
            // No internal retries; surface the failure and let the user
            // run the command again.
            output.error(format!("Search failed: {}", e));
            output.info("Check your network connection and try again.");
        }
    }
    Ok(())
}

pub async fn run_popular(output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = load_config(&paths)?;
    let client =
        CatalogClient::new(config.catalog.clone(), &config.search).map_err(|e| eyre!("{}", e))?;

    let bar = super::spinner(output, "Fetching popular titles...");
    let result = client.list_popular().await;
    bar.finish_and_clear();

    match result {
        Ok(candidates) => {
            if candidates.is_empty() {
                output.info("The catalog returned no popular titles");
            } else {
                render_candidates(&candidates, output)?;
            }
        }
        Err(e) => {
            output.error(format!("Failed to fetch popular titles: {}", e));
            output.info("Check your network connection and try again.");
        }
    }
    Ok(())
}

fn render_candidates(candidates: &[CatalogCandidate], output: &Output) -> Result<()> {
    if matches!(output.format(), OutputFormat::Json | OutputFormat::JsonPretty) {
        output.json(&serde_json::to_value(candidates)?);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Catalog ID", "Title", "Rating"]);

    for candidate in candidates {
        table.add_row(vec![
            candidate.id.to_string(),
            candidate.title.clone(),
            candidate
                .vote_average
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }

    output.println(table.to_string());
    Ok(())
}
