//! Favorites handlers

use crate::state::{AppState, ServerEvent};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bookfinder_core::types::favorites_summary;
use bookfinder_core::Book;
use serde::Serialize;

/// Favorites list response
#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub books: Vec<Book>,
    pub total: usize,
    pub summary: String,
}

/// Favorite status of one book
#[derive(Debug, Serialize)]
pub struct FavoriteStatus {
    pub id: String,
    pub favorite: bool,
}

/// List all favorites
pub async fn list_favorites(State(state): State<AppState>) -> Json<FavoritesResponse> {
    let books = state.favorites.list().await;
    let total = books.len();

    Json(FavoritesResponse {
        books,
        total,
        summary: favorites_summary(total),
    })
}

/// Add a book to the favorites
pub async fn add_favorite(
    State(state): State<AppState>,
    Json(book): Json<Book>,
) -> Result<StatusCode, (StatusCode, String)> {
    if book.id.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Book id is required".to_string()));
    }

    let id = book.id.clone();
    if state.favorites.add(book).await {
        state.broadcast(ServerEvent::FavoritesChanged { id, favorite: true });
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Check whether a book is a favorite
pub async fn get_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<FavoriteStatus> {
    let favorite = state.favorites.is_favorite(&id).await;
    Json(FavoriteStatus { id, favorite })
}

/// Remove a book from the favorites
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> StatusCode {
    if state.favorites.remove(&id).await {
        state.broadcast(ServerEvent::FavoritesChanged {
            id,
            favorite: false,
        });
    }
    StatusCode::NO_CONTENT
}

/// Toggle the favorite status of a book from the current results or favorites
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FavoriteStatus>, StatusCode> {
    let book = match state.controller.find_book(&id) {
        Some(book) => book,
        None => state.favorites.get(&id).await.ok_or(StatusCode::NOT_FOUND)?,
    };

    let favorite = state.favorites.toggle(book).await;
    state.broadcast(ServerEvent::FavoritesChanged {
        id: id.clone(),
        favorite,
    });

    Ok(Json(FavoriteStatus { id, favorite }))
}
