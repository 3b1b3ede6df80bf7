//! Error types for Bookfinder Core

use thiserror::Error;

/// Result type alias using BookfinderError
pub type Result<T> = std::result::Result<T, BookfinderError>;

/// Error raised while setting up a Bookfinder session
///
/// Searches and favorites never fail once a session is running; their
/// failures surface as state or log entries instead.
#[derive(Debug, Error)]
pub enum BookfinderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by a search client
#[derive(Debug, Error)]
pub enum SearchError {
    /// Transport failure or a non-success response
    #[error("Network error: {0}")]
    Network(String),

    /// The response body did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}

impl SearchError {
    /// Short label for the error kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::Network(_) => "network",
            SearchError::Parse(_) => "parse",
        }
    }
}

/// Errors that occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        min: u64,
        max: u64,
        value: u64,
    },

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),
}
