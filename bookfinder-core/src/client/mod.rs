//! Search clients translating free-text queries into books

mod google_books;
mod parse;

pub use google_books::GoogleBooksClient;
pub use parse::parse_volumes;

use crate::error::SearchError;
use crate::types::Book;
use async_trait::async_trait;

/// Trait for services that can search for books
///
/// Callers are expected to skip blank queries; implementations send whatever
/// they are given.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Search for books matching a free-text query
    async fn search(&self, query: &str) -> Result<Vec<Book>, SearchError>;
}
