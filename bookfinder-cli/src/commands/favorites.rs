//! Favorites commands

use super::render::{print_books, print_books_json};
use super::Session;
use anyhow::Result;
use bookfinder_core::types::favorites_summary;

/// List favorite books
pub async fn list_favorites(session: &Session, json: bool) -> Result<()> {
    let books = session.favorites.list().await;
    let flags = vec![true; books.len()];

    if json {
        return print_books_json(&books, &flags);
    }

    println!("{}", favorites_summary(books.len()));
    print_books(&books, &flags);
    Ok(())
}

/// Remove a book from the favorites
pub async fn remove_favorite(session: &Session, id: &str) -> Result<()> {
    if session.favorites.remove(id).await {
        println!("Removed {} from favorites", id);
    } else {
        println!("{} is not a favorite", id);
    }
    Ok(())
}
