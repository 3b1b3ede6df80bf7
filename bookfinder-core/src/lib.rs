//! Bookfinder Core Library
//!
//! This crate provides the book-discovery core shared by the Bookfinder front
//! ends: a search client for the remote book-search API, the session's
//! search/load controller, and the persistent favorites store.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod favorites;
pub mod storage;
pub mod types;

pub use client::{GoogleBooksClient, SearchClient};
pub use config::Config;
pub use controller::SearchController;
pub use error::{BookfinderError, ConfigError, Result, SearchError, StorageError};
pub use favorites::FavoritesStore;
pub use types::{Book, Phase, SearchState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_creation() {
        let book = Book::new("id-1", "Test Book");
        assert_eq!(book.title, "Test Book");
        assert!(book.authors.is_empty());
    }
}
