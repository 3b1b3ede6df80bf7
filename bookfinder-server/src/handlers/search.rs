//! Search state handlers

use crate::state::AppState;
use axum::{extract::State, Json};
use bookfinder_core::types::INITIAL_LOAD_MESSAGE;
use bookfinder_core::{Book, Phase};
use serde::{Deserialize, Serialize};

/// A book annotated with its favorite status
#[derive(Debug, Serialize)]
pub struct BookView {
    #[serde(flatten)]
    pub book: Book,
    pub favorite: bool,
}

/// Current search state as shown to the user
#[derive(Debug, Serialize)]
pub struct SearchStateResponse {
    pub query: String,
    pub phase: Phase,
    pub loading: bool,
    pub error: Option<String>,
    pub is_initial_load: bool,
    /// Indicator text while the initial recommendations load
    pub loading_message: Option<&'static str>,
    pub heading: &'static str,
    pub summary: Option<String>,
    pub books: Vec<BookView>,
}

/// Build the response for the current session state
pub async fn state_response(state: &AppState) -> SearchStateResponse {
    let snapshot = state.controller.state();

    let mut books = Vec::with_capacity(snapshot.books.len());
    for book in &snapshot.books {
        let favorite = state.favorites.is_favorite(&book.id).await;
        books.push(BookView {
            book: book.clone(),
            favorite,
        });
    }

    SearchStateResponse {
        phase: snapshot.phase(),
        heading: snapshot.heading(),
        summary: snapshot.result_summary(),
        loading_message: snapshot.is_initial_load.then_some(INITIAL_LOAD_MESSAGE),
        query: snapshot.query,
        loading: snapshot.loading,
        error: snapshot.error,
        is_initial_load: snapshot.is_initial_load,
        books,
    }
}

/// Get the current search state
pub async fn get_state(State(state): State<AppState>) -> Json<SearchStateResponse> {
    Json(state_response(&state).await)
}

/// Search request body
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

/// Submit a search and return the settled state
///
/// Blank queries are recorded but not sent to the search API. Event
/// subscribers are notified as the search starts and again as it settles.
pub async fn submit_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Json<SearchStateResponse> {
    state.controller.search(&request.query).await;
    Json(state_response(&state).await)
}
