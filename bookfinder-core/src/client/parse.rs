//! Normalization of Google Books volume listings

use crate::error::SearchError;
use crate::types::Book;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Title used for volumes that do not carry one
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Deserialize)]
struct RawVolume {
    id: String,
    #[serde(rename = "volumeInfo", default)]
    volume_info: RawVolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
struct RawVolumeInfo {
    title: Option<String>,
    authors: Option<Value>,
    description: Option<String>,
    #[serde(rename = "imageLinks")]
    image_links: Option<RawImageLinks>,
}

#[derive(Debug, Deserialize)]
struct RawImageLinks {
    thumbnail: Option<String>,
    #[serde(rename = "smallThumbnail")]
    small_thumbnail: Option<String>,
}

/// Parse a volume listing response body into books
///
/// The body must be a JSON object. A missing `items` field means no results.
/// Items that cannot be turned into a book are skipped individually.
pub fn parse_volumes(body: &str) -> Result<Vec<Book>, SearchError> {
    let json: Value =
        serde_json::from_str(body).map_err(|e| SearchError::Parse(format!("Invalid JSON: {}", e)))?;

    let object = json
        .as_object()
        .ok_or_else(|| SearchError::Parse("Expected a JSON object".to_string()))?;

    let items = match object.get("items") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(SearchError::Parse("`items` is not an array".to_string())),
    };

    let mut books = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match book_from_item(item) {
            Some(book) => books.push(book),
            None => debug!("Skipping malformed volume at index {}", index),
        }
    }
    Ok(books)
}

fn book_from_item(item: &Value) -> Option<Book> {
    let raw: RawVolume = serde_json::from_value(item.clone()).ok()?;
    let id = raw.id.trim();
    if id.is_empty() {
        return None;
    }

    let info = raw.volume_info;
    let title = info
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    let authors = match info.authors {
        Some(Value::Array(values)) => values
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    let thumbnail = info
        .image_links
        .and_then(|links| links.thumbnail.or(links.small_thumbnail))
        .filter(|url| !url.is_empty())
        .map(secure_url);

    let description = info.description.filter(|d| !d.trim().is_empty());

    Some(Book {
        id: id.to_string(),
        title,
        authors,
        thumbnail,
        description,
    })
}

/// Upgrade plain-HTTP cover links to HTTPS
fn secure_url(url: String) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url,
    }
}
