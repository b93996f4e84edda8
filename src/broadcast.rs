//! Change-notification fan-out for admin mutations.
//!
//! Every mutating API call publishes a small JSON payload here and every open
//! `/api/events` stream receives it as an SSE frame. Subscribers register via
//! [`ChangeFeed::subscribe`]; dropping the receiver on client disconnect
//! deregisters them. There is no retry and no reconnection on the server
//! side, a subscriber's lifecycle is open then closed.

use serde_json::Value;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::debug;

/// Interval between `ping` heartbeat frames on an event stream.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(25);

/// Buffered events per subscriber before a slow reader starts lagging.
const FEED_CAPACITY: usize = 64;

/// One change notification: an SSE event name plus its JSON payload.
#[derive(Clone, Debug)]
pub struct ChangeEvent {
    pub topic: &'static str,
    pub payload: Value,
}

/// Process-wide registry of live event-stream subscribers.
#[derive(Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    /// Register a new subscriber. Dropping the receiver deregisters it.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    /// Fan a payload out to every live subscriber.
    ///
    /// Delivery is best-effort: with no subscribers the event is dropped, and
    /// a subscriber that lags past its buffer misses events without affecting
    /// delivery to the rest.
    pub fn publish(&self, topic: &'static str, payload: Value) {
        if let Err(err) = self.tx.send(ChangeEvent { topic, payload }) {
            debug!("no live subscribers for `{}` event: {}", topic, err);
        }
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn publish_reaches_every_subscriber() {
        let feed = ChangeFeed::new();
        let mut a = feed.subscribe();
        let mut b = feed.subscribe();

        feed.publish("images", json!({ "action": "created", "id": 7 }));

        for rx in [&mut a, &mut b] {
            let event = rx.recv().await.unwrap();
            assert_eq!(event.topic, "images");
            assert_eq!(event.payload["id"], 7);
        }
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_silent() {
        let feed = ChangeFeed::new();
        feed.publish("meta", json!({ "action": "updated" }));
    }

    #[tokio::test]
    async fn dropped_subscriber_does_not_break_the_rest() {
        let feed = ChangeFeed::new();
        let gone = feed.subscribe();
        let mut alive = feed.subscribe();
        drop(gone);

        feed.publish("news", json!({ "action": "deleted", "id": 3 }));
        assert_eq!(alive.recv().await.unwrap().topic, "news");
    }
}
