//! Search and featured commands

use super::render::{favorite_flags, print_books, print_books_json};
use super::{spinner, Session};
use anyhow::{bail, Result};
use bookfinder_core::types::{HEADING_RECOMMENDED, INITIAL_LOAD_MESSAGE};
use tracing::warn;

/// Search for books and optionally mark results as favorites
pub async fn search(session: &Session, query: &str, mark: &[String], json: bool) -> Result<()> {
    if query.trim().is_empty() {
        session.controller.search(query).await;
        println!("Nothing to search for");
        return Ok(());
    }

    let pb = spinner(&format!("Searching for {}...", query.trim()));
    session.controller.search(query).await;
    pb.finish_and_clear();

    let state = session.controller.state();
    if let Some(error) = &state.error {
        bail!(error.clone());
    }

    for id in mark {
        match session.controller.find_book(id) {
            Some(book) => {
                session.favorites.add(book).await;
            }
            None => warn!("{} is not among the results, not marking it", id),
        }
    }

    let flags = favorite_flags(&session.favorites, &state.books).await;
    if json {
        return print_books_json(&state.books, &flags);
    }

    if let Some(summary) = state.result_summary() {
        println!("{}", summary);
    }
    print_books(&state.books, &flags);
    Ok(())
}

/// Show the recommended books
pub async fn featured(session: &Session, json: bool) -> Result<()> {
    let pb = spinner(INITIAL_LOAD_MESSAGE);
    session.controller.load_initial().await;
    pb.finish_and_clear();

    let state = session.controller.state();
    if let Some(error) = &state.error {
        bail!(error.clone());
    }

    let flags = favorite_flags(&session.favorites, &state.books).await;
    if json {
        return print_books_json(&state.books, &flags);
    }

    println!("{}", HEADING_RECOMMENDED);
    print_books(&state.books, &flags);
    Ok(())
}
