//! Google Books API client

use super::{parse_volumes, SearchClient};
use crate::config::Config;
use crate::error::{ConfigError, SearchError};
use crate::Result;
use crate::types::Book;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

/// Client for the Google Books `volumes` endpoint
#[derive(Clone)]
pub struct GoogleBooksClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    max_results: u32,
}

impl GoogleBooksClient {
    /// Create a client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("bookfinder/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            max_results: config.max_results,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SearchClient for GoogleBooksClient {
    async fn search(&self, query: &str) -> std::result::Result<Vec<Book>, SearchError> {
        let url = format!("{}/volumes", self.base_url);
        let max_results = self.max_results.to_string();
        let mut params: Vec<(&str, &str)> =
            vec![("q", query), ("maxResults", max_results.as_str())];
        if let Some(ref key) = self.api_key {
            params.push(("key", key.as_str()));
        }

        debug!("Google Books request: GET {} q={:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| SearchError::Network(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Google Books error response ({}): {}", status, error_text);
            return Err(SearchError::Network(format!(
                "Google Books returned status {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Network(format!("Failed to read response body: {}", e)))?;

        let books = parse_volumes(&body)?;
        info!("Google Books: {} result(s) for {:?}", books.len(), query);
        Ok(books)
    }
}
