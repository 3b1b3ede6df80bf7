//! Bookfinder Server - HTTP front end for book discovery

use anyhow::{Context, Result};
use bookfinder_core::Config;
use bookfinder_server::{routes, state};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "bookfinder_server=debug,bookfinder_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr: SocketAddr = std::env::var("BOOKFINDER_BIND")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()
        .context("Invalid BOOKFINDER_BIND address")?;

    // Create application state
    let state = state::AppState::new(&config).await?;

    // Load the recommendations in the background so the UI can show the indicator
    let session = state.clone();
    tokio::spawn(async move {
        session.load_initial().await;
    });

    // Build router
    let app = routes::create_router(state);

    // Start server
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
