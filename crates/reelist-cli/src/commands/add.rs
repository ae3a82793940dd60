use crate::commands::config::load_config;
use crate::output::Output;
use chrono::NaiveDate;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::{Confirm, Input, Select};
use std::sync::Arc;
use tracing::warn;
use watchlist_catalog::CatalogClient;
use watchlist_config::PathManager;
use watchlist_core::{AddEntryFlow, FlowState, WatchlistStore};
use watchlist_models::{NewEntry, WatchStatus};

pub async fn run_add(
    title: Option<String>,
    status: Option<WatchStatus>,
    date: Option<NaiveDate>,
    no_search: bool,
    output: &Output,
) -> Result<()> {
    let paths = PathManager::default();
    paths.ensure_directories().map_err(|e| eyre!("{}", e))?;
    let store = WatchlistStore::from_paths(&paths);

    // Quick path: store the title exactly as given, no catalog round trip.
    if no_search {
        let title = title.ok_or_else(|| eyre!("--no-search requires --title"))?;
        let entry = store
            .append(NewEntry {
                title,
                status: status.unwrap_or_default(),
                date: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
                poster_url: None,
            })
            .map_err(|e| eyre!("{}", e))?;
        output.success(format!("Added {:?} (id {})", entry.title, entry.id));
        return Ok(());
    }

    let config = load_config(&paths)?;
    let client =
        CatalogClient::new(config.catalog.clone(), &config.search).map_err(|e| eyre!("{}", e))?;
    let mut flow = AddEntryFlow::new(Arc::new(client), store.clone(), &config.search);

    flow.open();

    let mut query = match title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("Movie title")
            .interact_text()?,
    };

    // Editing/Reviewing loop: each typed query goes through the debounced
    // flow; the user picks a candidate, keeps the text as typed, or refines.
    loop {
        flow.input(&query);

        let bar = super::spinner(output, "Searching the catalog...");
        let result = flow.await_results().await;
        bar.finish_and_clear();

        if let Err(e) = result {
            output.error(format!("Search failed: {}", e));
            if Confirm::new()
                .with_prompt("Retry the search?")
                .default(true)
                .interact()?
            {
                continue;
            }
            // Keep whatever was typed and move on without candidates.
            break;
        }

        if flow.state() == FlowState::Reviewing {
            let mut items: Vec<String> = flow
                .candidates()
                .iter()
                .map(|c| match c.vote_average {
                    Some(rating) => format!("{} ({:.1})", c.title, rating),
                    None => c.title.clone(),
                })
                .collect();
            let keep_index = items.len();
            items.push(format!("Keep {:?} as typed", query));
            items.push("Search again".to_string());

            let picked = Select::new()
                .with_prompt("Select a match")
                .items(&items)
                .default(0)
                .interact()?;

            if picked < keep_index {
                flow.select(picked);
                break;
            }
            if picked == keep_index {
                break;
            }
            // Search again.
        } else {
            output.info(format!("No catalog matches for {:?}", query));
            if Confirm::new()
                .with_prompt("Keep it as the title anyway?")
                .default(true)
                .interact()?
            {
                break;
            }
        }

        query = Input::<String>::new()
            .with_prompt("Movie title")
            .with_initial_text(query.clone())
            .interact_text()?;
    }

    let status = match status {
        Some(s) => s,
        None => {
            let options = [WatchStatus::NotWatched, WatchStatus::Watched];
            let picked = Select::new()
                .with_prompt("Status")
                .items(&["not watched", "watched"])
                .default(0)
                .interact()?;
            options[picked]
        }
    };
    flow.set_status(status);

    let date = match date {
        Some(d) => d,
        None => loop {
            let raw: String = Input::new()
                .with_prompt("Date (YYYY-MM-DD)")
                .default(chrono::Local::now().date_naive().to_string())
                .interact_text()?;
            match raw.trim().parse::<NaiveDate>() {
                Ok(d) => break d,
                Err(_) => output.error("Invalid date, expected YYYY-MM-DD"),
            }
        },
    };
    flow.set_date(date);

    let draft = flow.draft();
    output.println(format!(
        "\n  {}\n  {} on {}\n",
        draft.title, draft.status, draft.date
    ));

    if !Confirm::new()
        .with_prompt("Add to watchlist?")
        .default(true)
        .interact()?
    {
        flow.cancel();
        output.info("Cancelled; nothing was saved");
        return Ok(());
    }

    match flow.submit() {
        Ok(entry) => {
            output.success(format!("Added {:?} (id {})", entry.title, entry.id));

            // Reload so the reported count reflects the durable state.
            let count = store
                .load()
                .unwrap_or_else(|e| {
                    warn!("failed to reload watchlist: {}", e);
                    Vec::new()
                })
                .len();
            output.info(format!(
                "Watchlist now has {} {}",
                count,
                if count == 1 { "entry" } else { "entries" }
            ));
        }
        Err(e) => output.error(format!("Failed to save entry: {}", e)),
    }

    Ok(())
}
