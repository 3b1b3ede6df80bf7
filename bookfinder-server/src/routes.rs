//! API routes

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Origins allowed when no override is configured
const DEV_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// Build the CORS layer
///
/// BOOKFINDER_CORS_ORIGINS can be comma-separated list of origins, or "*" for any
fn cors_layer(origins: Option<String>) -> CorsLayer {
    let allow_origin = match origins {
        Some(origins) if origins.trim() == "*" => AllowOrigin::any(),
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            AllowOrigin::list(allowed)
        }
        None => AllowOrigin::list(DEV_ORIGINS.map(HeaderValue::from_static)),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(std::env::var("BOOKFINDER_CORS_ORIGINS").ok());

    let api_routes = Router::new()
        // Search session
        .route("/state", get(handlers::get_state))
        .route("/search", post(handlers::submit_search))
        // Favorites
        .route(
            "/favorites",
            get(handlers::list_favorites).post(handlers::add_favorite),
        )
        .route(
            "/favorites/:id",
            get(handlers::get_favorite).delete(handlers::remove_favorite),
        )
        .route("/favorites/:id/toggle", post(handlers::toggle_favorite))
        // SSE endpoint
        .route("/sync", get(handlers::sync_events));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
