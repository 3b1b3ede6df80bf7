//! Server-Sent Events handler for real-time updates

use crate::state::{AppState, ServerEvent};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;
use tokio_stream::StreamExt;

/// SSE endpoint for real-time updates
pub async fn sync_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let event_stream = state.events().map(|event| {
        let (event_type, data) = encode_event(event);
        Ok(Event::default().event(event_type).data(data))
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}

/// Event name and JSON payload for a server event
pub fn encode_event(event: ServerEvent) -> (&'static str, String) {
    match event {
        ServerEvent::StateChanged => ("state_changed", "{}".to_string()),
        ServerEvent::FavoritesChanged { id, favorite } => (
            "favorites_changed",
            serde_json::json!({ "id": id, "favorite": favorite }).to_string(),
        ),
    }
}
