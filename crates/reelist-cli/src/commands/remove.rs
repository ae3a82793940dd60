use crate::output::Output;
use color_eyre::Result;
use dialoguer::Confirm;
use tracing::warn;
use watchlist_config::PathManager;
use watchlist_core::WatchlistStore;

pub async fn run_remove(id: String, yes: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let store = WatchlistStore::from_paths(&paths);

    let entries = store.load().unwrap_or_else(|e| {
        warn!("failed to load watchlist: {}", e);
        Vec::new()
    });

    let Some(entry) = entries.iter().find(|e| e.id == id) else {
        output.warn(format!("No entry with id {}", id));
        return Ok(());
    };

    if !yes {
        let prompt = format!("Remove {:?} ({} on {})?", entry.title, entry.status, entry.date);
        if !Confirm::new().with_prompt(prompt).default(false).interact()? {
            output.info("Nothing removed");
            return Ok(());
        }
    }

    match store.remove(&id) {
        Ok(true) => output.success(format!("Removed {:?}", entry.title)),
        Ok(false) => output.warn(format!("No entry with id {}", id)),
        Err(e) => output.error(format!("Failed to remove entry: {}", e)),
    }
    Ok(())
}
