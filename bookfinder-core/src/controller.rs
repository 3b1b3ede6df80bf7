//! Search/load controller owning the session's search state
//!
//! Every state transition is applied through a `watch` channel, whose lock
//! is never held across the remote call, so two searches may be in flight at
//! once and subscribers observe each transition, including `loading` turning
//! on. Without the stale-response guard, whichever fetch settles last decides
//! `books`, `error` and `loading`.

use crate::client::SearchClient;
use crate::config::Config;
use crate::error::SearchError;
use crate::types::{Book, Phase, SearchState};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Message shown when the initial recommendations cannot be loaded
pub const INITIAL_LOAD_ERROR: &str =
    "Failed to load recommended books. Please try again later.";

/// Message shown when a user search fails
pub const SEARCH_ERROR: &str = "Search failed. Please try again later.";

/// Orchestrates the initial load and user searches for one session
pub struct SearchController {
    client: Arc<dyn SearchClient>,
    default_query: String,
    discard_stale_responses: bool,
    state: watch::Sender<SearchState>,
    /// Sequence number of the most recently issued fetch
    latest: AtomicU64,
    started: AtomicBool,
}

impl SearchController {
    /// Create a controller with the given client and default settings
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self::with_config(client, &Config::default())
    }

    /// Create a controller using the default query and stale-response policy from `config`
    pub fn with_config(client: Arc<dyn SearchClient>, config: &Config) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            client,
            default_query: config.default_query.clone(),
            discard_stale_responses: config.discard_stale_responses,
            state,
            latest: AtomicU64::new(0),
            started: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state transition
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Current position in the state machine
    pub fn phase(&self) -> Phase {
        self.state.borrow().phase()
    }

    /// Current results
    pub fn books(&self) -> Vec<Book> {
        self.state.borrow().books.clone()
    }

    /// Find a book in the current results
    pub fn find_book(&self, id: &str) -> Option<Book> {
        self.state.borrow().books.iter().find(|b| b.id == id).cloned()
    }

    /// Load the default recommendations
    ///
    /// Runs once per session; later calls are ignored.
    pub async fn load_initial(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            warn!("Initial load already ran for this session, ignoring");
            return;
        }

        let mut sequence = 0;
        self.state.send_modify(|state| {
            state.loading = true;
            sequence = self.next_sequence();
        });

        info!("Loading recommendations for {:?}", self.default_query);
        let result = self.client.search(&self.default_query).await;
        self.settle(sequence, result, INITIAL_LOAD_ERROR, true);
    }

    /// Run a user search
    ///
    /// The term is always recorded as the current query. Blank terms stop
    /// there without touching `loading`, `books` or `error`.
    pub async fn search(&self, term: &str) {
        let Some(sequence) = self.begin_search(term) else {
            debug!("Ignoring blank search");
            return;
        };

        info!("Searching for {:?}", term.trim());
        let result = self.client.search(term.trim()).await;
        self.settle(sequence, result, SEARCH_ERROR, false);
    }

    /// Record `term` and, unless it is blank, start a fetch for it
    ///
    /// The query and its sequence number are assigned in one transition so
    /// the most recently recorded query always holds the newest sequence.
    fn begin_search(&self, term: &str) -> Option<u64> {
        let mut sequence = None;
        self.state.send_modify(|state| {
            state.query = term.to_string();
            if term.trim().is_empty() {
                return;
            }
            state.loading = true;
            state.error = None;
            sequence = Some(self.next_sequence());
        });
        sequence
    }

    fn next_sequence(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn settle(
        &self,
        sequence: u64,
        result: Result<Vec<Book>, SearchError>,
        failure_message: &str,
        initial: bool,
    ) {
        self.state.send_if_modified(|state| {
            let ended_initial_load = initial && state.is_initial_load;
            if initial {
                state.is_initial_load = false;
            }

            if self.discard_stale_responses && sequence < self.latest.load(Ordering::SeqCst) {
                debug!("Discarding stale response for fetch #{}", sequence);
                return ended_initial_load;
            }

            state.loading = false;
            match result {
                Ok(books) => {
                    info!("Fetch #{} returned {} book(s)", sequence, books.len());
                    state.books = books;
                    state.error = None;
                }
                Err(e) => {
                    warn!("Fetch #{} failed ({}): {}", sequence, e.kind(), e);
                    state.error = Some(failure_message.to_string());
                }
            }
            true
        });
    }
}
