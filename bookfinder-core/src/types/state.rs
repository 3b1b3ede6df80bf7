//! Session search state

use super::Book;
use serde::{Deserialize, Serialize};

/// Heading shown above search results
pub const HEADING_RESULTS: &str = "Search results";

/// Heading shown above the default recommendations
pub const HEADING_RECOMMENDED: &str = "Recommended books";

/// Indicator text while the initial recommendations load
pub const INITIAL_LOAD_MESSAGE: &str = "Loading recommended books...";

/// The state of one search session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    /// Most recently submitted query, blank or not
    pub query: String,

    /// Results of the most recently completed fetch
    pub books: Vec<Book>,

    /// Whether a fetch is in flight
    pub loading: bool,

    /// User-facing message for the last failed fetch
    pub error: Option<String>,

    /// True until the initial recommendations load settles
    pub is_initial_load: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            books: Vec::new(),
            loading: false,
            error: None,
            is_initial_load: true,
        }
    }
}

/// Position of a session in the search state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the default recommendations
    LoadingInitial,
    /// Last fetch succeeded with no books
    Idle,
    /// Last fetch succeeded with at least one book
    HasResults,
    /// A user search is in flight
    Loading,
    /// Last fetch failed
    Error,
}

impl SearchState {
    /// Derive the state-machine phase from the current fields
    pub fn phase(&self) -> Phase {
        if self.is_initial_load {
            Phase::LoadingInitial
        } else if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Error
        } else if self.books.is_empty() {
            Phase::Idle
        } else {
            Phase::HasResults
        }
    }

    /// Whether a query has been recorded
    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    /// Heading for the results section
    pub fn heading(&self) -> &'static str {
        if self.has_query() {
            HEADING_RESULTS
        } else {
            HEADING_RECOMMENDED
        }
    }

    /// Summary line for a settled, successful search
    ///
    /// Only present when a query is recorded, nothing is loading and the last
    /// fetch did not fail.
    pub fn result_summary(&self) -> Option<String> {
        if !self.has_query() || self.loading || self.error.is_some() {
            return None;
        }
        Some(format!(
            "Results for: {} ({} found)",
            self.query,
            count_books(self.books.len())
        ))
    }
}

/// Summary of the favorites view
pub fn favorites_summary(count: usize) -> String {
    if count == 0 {
        "No favorites yet. Mark books as favorites to collect them here.".to_string()
    } else {
        format!("You have {} in your favorites", count_books(count))
    }
}

fn count_books(n: usize) -> String {
    if n == 1 {
        "1 book".to_string()
    } else {
        format!("{} books", n)
    }
}
