use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use commands::{add, config, list, remove, search};
use watchlist_models::WatchStatus;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelist")]
#[command(about = "reelist - Track the movies you want to watch and the ones you have seen")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the persisted watchlist
    List,

    /// Search the remote catalog by title
    #[command(long_about = "Search the remote movie catalog by title. Queries shorter than the configured minimum (3 characters by default) are not sent to the network.")]
    Search {
        /// Title text to search for
        query: String,
    },

    /// Show the catalog's currently popular titles
    Popular,

    /// Add a movie to the watchlist
    #[command(long_about = "Add a movie to the watchlist. Without flags this runs the interactive flow: type a title, pick a catalog match, choose a status and date. With --no-search the entry is stored exactly as given.")]
    Add {
        /// Movie title (skips the title prompt)
        #[arg(long)]
        title: Option<String>,

        /// Watch status ('watched' or 'not watched')
        #[arg(long)]
        status: Option<WatchStatus>,

        /// Date in YYYY-MM-DD form (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Skip the catalog search and store the title as given
        #[arg(long, action = ArgAction::SetTrue)]
        no_search: bool,
    },

    /// Remove an entry from the watchlist by id
    Remove {
        /// Entry id as shown by 'reelist list'
        id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long, action = ArgAction::SetTrue)]
        yes: bool,
    },

    /// Configure the catalog connection
    #[command(long_about = "Manage configuration for reelist. The catalog API key is stored in config.toml and injected into the search client at startup; it is never read from global state.")]
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Set catalog API credentials and options
    Catalog {
        /// Catalog API key (if not provided, will prompt)
        #[arg(long)]
        api_key: Option<String>,

        /// Result language, e.g. en-US
        #[arg(long)]
        language: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet);

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::List => list::run_list(&output).await,
        Commands::Search { query } => search::run_search(query, &output).await,
        Commands::Popular => search::run_popular(&output).await,
        Commands::Add {
            title,
            status,
            date,
            no_search,
        } => add::run_add(title, status, date, no_search, &output).await,
        Commands::Remove { id, yes } => remove::run_remove(id, yes, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output).await,
    }
}
