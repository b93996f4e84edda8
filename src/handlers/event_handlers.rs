//! Server-Sent-Events subscription endpoint.

use crate::{broadcast::HEARTBEAT_INTERVAL, state::AppState};
use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures::Stream;
use std::convert::Infallible;
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

/// GET `/api/events` — long-lived change-notification stream.
///
/// Emits a `ping` frame immediately on open and every 25 s thereafter so
/// intermediaries keep the connection alive; domain frames (`images`,
/// `news`, `meta`) carry the mutation payload. The stream ends only when the
/// client disconnects.
pub async fn subscribe_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.events.subscribe();

    let stream = async_stream::stream! {
        // the first tick fires immediately, giving the on-open ping
        let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);
        loop {
            tokio::select! {
                _ = heartbeat.tick() => {
                    yield Ok::<Event, Infallible>(Event::default().event("ping").data(""));
                }
                change = rx.recv() => match change {
                    Ok(change) => {
                        yield Ok(Event::default()
                            .event(change.topic)
                            .data(change.payload.to_string()));
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        debug!("event subscriber lagged, skipped {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }
    };

    Sse::new(stream)
}
