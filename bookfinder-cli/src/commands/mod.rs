//! CLI command implementations

mod favorites;
mod interactive;
mod render;
mod search;

pub use favorites::{list_favorites, remove_favorite};
pub use interactive::interactive;
pub use search::{featured, search};

use anyhow::{Context, Result};
use bookfinder_core::{Config, FavoritesStore, GoogleBooksClient, SearchController};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Controller and favorites for one CLI invocation
pub struct Session {
    pub controller: SearchController,
    pub favorites: FavoritesStore,
}

impl Session {
    /// Open a session: build the search client and load favorites
    pub async fn open(config: &Config) -> Result<Self> {
        let client = GoogleBooksClient::new(config).context("Failed to set up search client")?;
        let favorites = FavoritesStore::open(&config.data_dir)
            .await
            .with_context(|| format!("Failed to open {}", config.data_dir.display()))?;

        Ok(Self {
            controller: SearchController::with_config(Arc::new(client), config),
            favorites,
        })
    }
}

/// Read configuration from the environment and apply command-line overrides
///
/// Without `--data-dir` or `BOOKFINDER_DATA_DIR`, favorites live in the
/// platform data directory.
pub fn resolve_config(data_dir: Option<PathBuf>, api_url: Option<String>) -> Result<Config> {
    let mut config = Config::from_env().context("Invalid configuration")?;

    if let Some(dir) = data_dir {
        config.data_dir = dir;
    } else if std::env::var_os("BOOKFINDER_DATA_DIR").is_none() {
        if let Some(dirs) = directories::ProjectDirs::from("", "", "bookfinder") {
            config.data_dir = dirs.data_dir().to_path_buf();
        }
    }

    if let Some(url) = api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }

    Ok(config)
}

/// Spinner shown while a fetch is in flight
fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
