//! Push channel from the service to an open extension popup.
//!
//! The popup may or may not be listening; publishing with nobody subscribed is
//! a normal outcome and is dropped silently.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use serde::Serialize;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use tracing::debug;

use crate::models::detection::DetectedJob;
use crate::state::AppState;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ExtensionEvent {
    JobDetected { job: DetectedJob },
}

impl ExtensionEvent {
    fn name(&self) -> &'static str {
        match self {
            ExtensionEvent::JobDetected { .. } => "jobDetected",
        }
    }
}

#[derive(Clone)]
pub struct EventHub {
    tx: broadcast::Sender<ExtensionEvent>,
}

impl EventHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ExtensionEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: ExtensionEvent) {
        let name = event.name();
        match self.tx.send(event) {
            Ok(receivers) => debug!("Published {name} to {receivers} listener(s)"),
            Err(_) => debug!("No listener for {name}; dropped"),
        }
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

/// GET /api/v1/events
pub async fn handle_event_stream(State(state): State<AppState>) -> impl IntoResponse {
    let stream = BroadcastStream::new(state.events.subscribe()).filter_map(|result| match result {
        Ok(event) => {
            let data = serde_json::to_string(&event).unwrap_or_default();
            Some(Ok::<_, Infallible>(Event::default().event(event.name()).data(data)))
        }
        Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(_)) => {
            Some(Ok(Event::default().event("lagged").data("{}")))
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
