use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use tracing::warn;
use watchlist_config::PathManager;
use watchlist_core::WatchlistStore;

pub async fn run_list(output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let store = WatchlistStore::from_paths(&paths);

    // Storage failures degrade to an empty list; the cause is only logged.
    let entries = store.load().unwrap_or_else(|e| {
        warn!("failed to load watchlist: {}", e);
        Vec::new()
    });

    if matches!(output.format(), OutputFormat::Json | OutputFormat::JsonPretty) {
        output.json(&serde_json::to_value(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        output.info("Watchlist is empty. Add a movie with 'reelist add'.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Title", "Status", "Date"]);

    for entry in &entries {
        table.add_row(vec![
            entry.id.clone(),
            entry.title.clone(),
            entry.status.to_string(),
            entry.date.to_string(),
        ]);
    }

    output.println(table.to_string());
    output.info(format!(
        "{} {}",
        entries.len(),
        if entries.len() == 1 { "entry" } else { "entries" }
    ));
    Ok(())
}
