//! Tokio broadcast event bus for store change notifications.

use crate::models::{Collection, StoreEvent};
use tokio::sync::broadcast;

/// Default buffer capacity for a store's event bus.
pub const DEFAULT_EVENT_BUS_CAPACITY: usize = 256;

/// Broadcast bus carrying [`StoreEvent`]s to every subscriber.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

/// Filtered receiver that yields events matching a predicate.
pub struct FilteredReceiver<F> {
    receiver: broadcast::Receiver<StoreEvent>,
    predicate: F,
}

impl EventBus {
    /// Creates a new event bus with the given buffer capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event to all subscribers (best effort).
    ///
    /// Having no subscribers is not an error.
    pub fn publish(&self, event: StoreEvent) {
        metrics::counter!("store_events_published_total", "collection" => event.collection().as_str())
            .increment(1);
        if self.sender.send(event).is_err() {
            metrics::counter!("store_events_unobserved_total").increment(1);
        }
    }

    /// Subscribes to every event.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        metrics::counter!("store_event_subscriptions_total").increment(1);
        self.sender.subscribe()
    }

    /// Subscribes with a predicate to filter events.
    #[must_use]
    pub fn subscribe_filtered<F>(&self, predicate: F) -> FilteredReceiver<F>
    where
        F: Fn(&StoreEvent) -> bool,
    {
        FilteredReceiver {
            receiver: self.subscribe(),
            predicate,
        }
    }

    /// Subscribes to events touching one collection.
    #[must_use]
    pub fn subscribe_collection(
        &self,
        collection: Collection,
    ) -> FilteredReceiver<impl Fn(&StoreEvent) -> bool> {
        self.subscribe_filtered(move |event| event.collection() == collection)
    }

    /// Returns the number of live subscribers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUS_CAPACITY)
    }
}

impl<F> FilteredReceiver<F>
where
    F: Fn(&StoreEvent) -> bool,
{
    /// Receives the next event that matches the predicate.
    pub async fn recv(&mut self) -> Result<StoreEvent, broadcast::error::RecvError> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => {
                    if (self.predicate)(&event) {
                        return Ok(event);
                    }
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    metrics::counter!("store_events_lagged_total").increment(skipped);
                },
                Err(err) => return Err(err),
            }
        }
    }
}
