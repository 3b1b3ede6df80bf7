//! Bookfinder CLI - Command-line front end for book discovery

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bookfinder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding favorites (defaults to the platform data directory)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Base URL of the book-search API
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for books
    Search {
        /// Free-text query
        query: String,

        /// Mark a result as favorite by its id (repeatable)
        #[arg(long = "favorite", value_name = "ID")]
        favorites: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show recommended books
    Featured {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage favorite books
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Start an interactive search session
    Interactive,
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorite books
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a book from the favorites
    Remove {
        /// Book id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "bookfinder_cli=debug,bookfinder_core=debug"
    } else {
        "bookfinder_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = commands::resolve_config(cli.data_dir, cli.api_url)?;
    let session = commands::Session::open(&config).await?;

    match cli.command {
        Commands::Search {
            query,
            favorites,
            json,
        } => commands::search(&session, &query, &favorites, json).await,

        Commands::Featured { json } => commands::featured(&session, json).await,

        Commands::Favorites { action } => match action {
            FavoritesAction::List { json } => commands::list_favorites(&session, json).await,
            FavoritesAction::Remove { id } => commands::remove_favorite(&session, &id).await,
        },

        Commands::Interactive => commands::interactive(&session).await,
    }
}
