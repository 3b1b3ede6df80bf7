//! Runtime configuration read from the environment

use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

/// Base URL of the Google Books API
pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/books/v1";

/// Query used for the recommendations shown at startup
pub const DEFAULT_QUERY: &str = "bestseller fiction";

/// Largest page size the remote API accepts
pub const MAX_RESULTS_LIMIT: u64 = 40;

/// Settings shared by every front end
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the book-search API
    pub api_url: String,

    /// Optional API key appended to every request
    pub api_key: Option<String>,

    /// Number of results requested per search
    pub max_results: u32,

    /// Transport timeout for one request
    pub timeout: Duration,

    /// Query issued by the initial load
    pub default_query: String,

    /// Directory holding persisted favorites
    pub data_dir: PathBuf,

    /// Drop responses that arrive after a newer search was issued
    pub discard_stale_responses: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            max_results: 20,
            timeout: Duration::from_secs(10),
            default_query: DEFAULT_QUERY.to_string(),
            data_dir: PathBuf::from("./bookfinder_data"),
            discard_stale_responses: false,
        }
    }
}

impl Config {
    /// Build configuration from `BOOKFINDER_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = non_empty(lookup("BOOKFINDER_API_URL")) {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        config.api_key = non_empty(lookup("BOOKFINDER_API_KEY"));

        if let Some(raw) = non_empty(lookup("BOOKFINDER_MAX_RESULTS")) {
            let value = parse_u64("BOOKFINDER_MAX_RESULTS", &raw)?;
            if !(1..=MAX_RESULTS_LIMIT).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    name: "BOOKFINDER_MAX_RESULTS",
                    min: 1,
                    max: MAX_RESULTS_LIMIT,
                    value,
                });
            }
            config.max_results = value as u32;
        }

        if let Some(raw) = non_empty(lookup("BOOKFINDER_TIMEOUT_SECS")) {
            let secs = parse_u64("BOOKFINDER_TIMEOUT_SECS", &raw)?;
            if secs == 0 {
                return Err(ConfigError::OutOfRange {
                    name: "BOOKFINDER_TIMEOUT_SECS",
                    min: 1,
                    max: u64::MAX,
                    value: secs,
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(query) = non_empty(lookup("BOOKFINDER_DEFAULT_QUERY")) {
            config.default_query = query;
        }
        if let Some(dir) = non_empty(lookup("BOOKFINDER_DATA_DIR")) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = non_empty(lookup("BOOKFINDER_DISCARD_STALE")) {
            config.discard_stale_responses = parse_bool("BOOKFINDER_DISCARD_STALE", &raw)?;
        }

        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_u64(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: raw.to_string(),
    })
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_query, "bestseller fiction");
        assert!(!config.discard_stale_responses);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("BOOKFINDER_API_URL", "http://localhost:8080/books/v1/"),
            ("BOOKFINDER_API_KEY", "secret"),
            ("BOOKFINDER_MAX_RESULTS", "5"),
            ("BOOKFINDER_TIMEOUT_SECS", "3"),
            ("BOOKFINDER_DATA_DIR", "/tmp/favs"),
            ("BOOKFINDER_DISCARD_STALE", "yes"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:8080/books/v1");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.max_results, 5);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/favs"));
        assert!(config.discard_stale_responses);
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = Config::from_lookup(lookup(&[
            ("BOOKFINDER_API_KEY", "  "),
            ("BOOKFINDER_DEFAULT_QUERY", ""),
        ]))
        .unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.default_query, DEFAULT_QUERY);
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::from_lookup(lookup(&[("BOOKFINDER_MAX_RESULTS", "many")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = Config::from_lookup(lookup(&[("BOOKFINDER_MAX_RESULTS", "41")])).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { value: 41, .. }));

        let err = Config::from_lookup(lookup(&[("BOOKFINDER_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));

        let err = Config::from_lookup(lookup(&[("BOOKFINDER_DISCARD_STALE", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
