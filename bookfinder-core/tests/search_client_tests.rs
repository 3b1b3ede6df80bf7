//! Integration tests for the Google Books client against a local stand-in API

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use bookfinder_core::{
    Config, GoogleBooksClient, Phase, SearchClient, SearchController, SearchError,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Requests = Arc<Mutex<Vec<HashMap<String, String>>>>;

const DUNE_RESPONSE: &str = r#"{
    "kind": "books#volumes",
    "totalItems": 2,
    "items": [
        {"id": "dune-1", "volumeInfo": {"title": "Dune", "authors": ["Frank Herbert"]}},
        {"id": "dune-2", "volumeInfo": {"title": "Dune Messiah", "authors": ["Frank Herbert"]}}
    ]
}"#;

async fn volumes(
    State(requests): State<Requests>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let query = params.get("q").cloned().unwrap_or_default();
    requests.lock().unwrap().push(params);

    match query.as_str() {
        "dune" | "bestseller fiction" => (StatusCode::OK, DUNE_RESPONSE.to_string()),
        "nothing" => (StatusCode::OK, r#"{"kind":"books#volumes","totalItems":0}"#.to_string()),
        "garbage" => (StatusCode::OK, "<html>not json</html>".to_string()),
        "forbidden" => (StatusCode::FORBIDDEN, r#"{"error":"quota"}"#.to_string()),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()),
    }
}

/// Start the stand-in API and return its base URL
async fn start_stub_api() -> (String, Requests) {
    let requests: Requests = Arc::default();
    let app = Router::new()
        .route("/books/v1/volumes", get(volumes))
        .with_state(requests.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/books/v1", addr), requests)
}

fn client_for(api_url: &str) -> GoogleBooksClient {
    let config = Config {
        api_url: api_url.to_string(),
        api_key: Some("test-key".to_string()),
        max_results: 7,
        ..Default::default()
    };
    GoogleBooksClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_search_returns_normalized_books() {
    let (url, requests) = start_stub_api().await;
    let client = client_for(&url);

    let books = client.search("dune").await.unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0].id, "dune-1");
    assert_eq!(books[1].title, "Dune Messiah");

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["q"], "dune");
    assert_eq!(requests[0]["maxResults"], "7");
    assert_eq!(requests[0]["key"], "test-key");
}

#[tokio::test]
async fn test_search_without_items_is_empty() {
    let (url, _) = start_stub_api().await;
    let books = client_for(&url).search("nothing").await.unwrap();
    assert!(books.is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_network_error() {
    let (url, _) = start_stub_api().await;
    let client = client_for(&url);

    for query in ["forbidden", "explode"] {
        let err = client.search(query).await.unwrap_err();
        assert!(matches!(err, SearchError::Network(_)), "query: {}", query);
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let (url, _) = start_stub_api().await;
    let err = client_for(&url).search("garbage").await.unwrap_err();
    assert!(matches!(err, SearchError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(&format!("http://{}/books/v1", addr))
        .search("dune")
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Network(_)));
}

#[tokio::test]
async fn test_controller_session_against_stub_api() {
    let (url, requests) = start_stub_api().await;
    let controller = SearchController::new(Arc::new(client_for(&url)));

    controller.load_initial().await;
    assert_eq!(controller.phase(), Phase::HasResults);

    controller.search("").await;
    assert_eq!(requests.lock().unwrap().len(), 1);

    controller.search("garbage").await;
    let state = controller.state();
    assert!(state.error.is_some());
    assert_eq!(state.books.len(), 2);

    controller.search("nothing").await;
    assert_eq!(controller.phase(), Phase::Idle);
    assert_eq!(requests.lock().unwrap().len(), 3);
}
