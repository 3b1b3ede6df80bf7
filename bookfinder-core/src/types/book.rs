//! The normalized Book record

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A single searchable title as returned by a search client.
///
/// Books are immutable once fetched and compare equal when their
/// identifiers match, regardless of the remaining fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Identifier assigned by the remote source
    pub id: String,

    /// Book title
    pub title: String,

    /// Authors in the order the source lists them
    #[serde(default)]
    pub authors: Vec<String>,

    /// Cover image URL
    #[serde(default)]
    pub thumbnail: Option<String>,

    /// Book description/summary
    #[serde(default)]
    pub description: Option<String>,
}

impl Book {
    /// Create a book with the given identifier and title
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            authors: Vec::new(),
            thumbnail: None,
            description: None,
        }
    }

    /// Add an author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    /// Set the cover image URL
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Authors joined for display, empty if none are known
    pub fn authors_display(&self) -> String {
        self.authors.join(", ")
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
