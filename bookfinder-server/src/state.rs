//! Application state

use anyhow::{Context, Result};
use bookfinder_core::{Config, FavoritesStore, GoogleBooksClient, SearchController};
use futures::stream::Stream;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio_stream::wrappers::{BroadcastStream, WatchStream};
use tokio_stream::StreamExt;

/// Shared application state
///
/// The server hosts a single session: one controller and one favorites store.
#[derive(Clone)]
pub struct AppState {
    /// Search/load controller for the session
    pub controller: Arc<SearchController>,

    /// Persistent favorites
    pub favorites: Arc<FavoritesStore>,

    /// Channel for favorites events
    pub event_tx: broadcast::Sender<ServerEvent>,
}

/// Server-sent events
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// The search state changed, including a fetch starting or settling
    StateChanged,

    /// A favorite was added or removed
    FavoritesChanged { id: String, favorite: bool },
}

impl AppState {
    /// Create application state from configuration
    pub async fn new(config: &Config) -> Result<Self> {
        let client = GoogleBooksClient::new(config).context("Failed to set up search client")?;
        let favorites = FavoritesStore::open(&config.data_dir)
            .await
            .with_context(|| format!("Failed to open {}", config.data_dir.display()))?;
        let controller = SearchController::with_config(Arc::new(client), config);

        Ok(Self::from_parts(controller, favorites))
    }

    /// Assemble state from an existing controller and favorites store
    pub fn from_parts(controller: SearchController, favorites: FavoritesStore) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            controller: Arc::new(controller),
            favorites: Arc::new(favorites),
            event_tx,
        }
    }

    /// Run the session's initial load
    pub async fn load_initial(&self) {
        self.controller.load_initial().await;
    }

    /// Stream of events from now on
    ///
    /// Search state transitions come straight from the controller, so a
    /// subscriber sees `loading` turn on before the fetch settles. Changes
    /// that land before the stream is polled are coalesced into one event.
    pub fn events(&self) -> impl Stream<Item = ServerEvent> + Send + 'static {
        let states = WatchStream::from_changes(self.controller.subscribe())
            .map(|_| ServerEvent::StateChanged);
        // Events missed by a lagging receiver are skipped
        let others =
            BroadcastStream::new(self.event_tx.subscribe()).filter_map(|result| result.ok());
        states.merge(others)
    }

    /// Broadcast an event
    pub fn broadcast(&self, event: ServerEvent) {
        // Ignore errors (no subscribers)
        let _ = self.event_tx.send(event);
    }
}
