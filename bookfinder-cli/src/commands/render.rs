//! Terminal rendering of books and search state

use anyhow::Result;
use bookfinder_core::{Book, FavoritesStore, SearchState};
use serde::Serialize;

/// A book row for JSON output
#[derive(Serialize)]
struct BookRow<'a> {
    #[serde(flatten)]
    book: &'a Book,
    favorite: bool,
}

/// Favorite flags for a list of books, in order
pub async fn favorite_flags(favorites: &FavoritesStore, books: &[Book]) -> Vec<bool> {
    let mut flags = Vec::with_capacity(books.len());
    for book in books {
        flags.push(favorites.is_favorite(&book.id).await);
    }
    flags
}

/// Print books as a numbered list
pub fn print_books(books: &[Book], flags: &[bool]) {
    for (index, book) in books.iter().enumerate() {
        let marker = if flags.get(index).copied().unwrap_or(false) {
            "*"
        } else {
            " "
        };
        println!("{:>3}. [{}] {}", index + 1, marker, book.title);
        if !book.authors.is_empty() {
            println!("          by {}", book.authors_display());
        }
        println!("          id: {}", book.id);
    }
}

/// Print books as a JSON array with favorite flags
pub fn print_books_json(books: &[Book], flags: &[bool]) -> Result<()> {
    let rows: Vec<BookRow> = books
        .iter()
        .zip(flags.iter().copied().chain(std::iter::repeat(false)))
        .map(|(book, favorite)| BookRow { book, favorite })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

/// Print the settled search state: error, summary, heading and results
pub fn print_state(state: &SearchState, flags: &[bool]) {
    if let Some(error) = &state.error {
        println!("! {}", error);
    }
    if let Some(summary) = state.result_summary() {
        println!("{}", summary);
    }
    println!();
    println!("{}", state.heading());
    println!("{}", "-".repeat(state.heading().len()));
    if state.books.is_empty() {
        println!("(no books)");
    } else {
        print_books(&state.books, flags);
    }
}
