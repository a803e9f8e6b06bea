use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::types::TelemetryEvent;

/// Per-subscriber outbox depth. A viewer that falls this far behind
/// starts losing its own event copies; nobody else is affected.
pub const SUBSCRIBER_OUTBOX_CAPACITY: usize = 64;

struct Subscriber {
    id: String,
    tx: mpsc::Sender<TelemetryEvent>,
}

/// Topic-keyed fan-out: one channel per asset id, any number of live
/// subscribers per channel.
///
/// `publish` takes the channel entry mutably, so publishes for the
/// same asset are serialized and every subscriber of that asset
/// observes the same relative order. Channels for different assets
/// proceed independently.
pub struct TelemetryHub {
    channels: DashMap<String, Vec<Subscriber>>,
}

impl TelemetryHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Register `subscriber_id` on `asset_id`'s channel.
    ///
    /// Re-subscribing with the same id replaces the previous sender,
    /// so a reconnecting viewer never holds two outboxes.
    pub fn subscribe(
        &self,
        asset_id: &str,
        subscriber_id: &str,
        tx: mpsc::Sender<TelemetryEvent>,
    ) {
        let mut subs = self.channels.entry(asset_id.to_string()).or_default();
        subs.retain(|s| s.id != subscriber_id);
        subs.push(Subscriber {
            id: subscriber_id.to_string(),
            tx,
        });
        debug!(asset_id, subscriber_id, "subscribed");
    }

    /// Remove `subscriber_id` from `asset_id`'s channel. Unknown pairs
    /// are a no-op.
    pub fn unsubscribe(&self, asset_id: &str, subscriber_id: &str) {
        if let Some(mut subs) = self.channels.get_mut(asset_id) {
            subs.retain(|s| s.id != subscriber_id);
        }
        self.channels.remove_if(asset_id, |_, subs| subs.is_empty());
        debug!(asset_id, subscriber_id, "unsubscribed");
    }

    /// Remove `subscriber_id` from every channel (disconnect path).
    pub fn drop_subscriber(&self, subscriber_id: &str) {
        for mut entry in self.channels.iter_mut() {
            entry.value_mut().retain(|s| s.id != subscriber_id);
        }
        self.channels.retain(|_, subs| !subs.is_empty());
        debug!(subscriber_id, "dropped from all channels");
    }

    /// Deliver `event` to every current subscriber of `asset_id`.
    ///
    /// Best-effort and non-blocking: a full outbox drops that
    /// subscriber's copy, a closed outbox prunes the subscriber.
    /// Publishing to zero subscribers is a no-op. Returns the number
    /// of subscribers the event was handed to.
    pub fn publish(&self, asset_id: &str, event: TelemetryEvent) -> usize {
        let Some(mut subs) = self.channels.get_mut(asset_id) else {
            return 0;
        };

        let mut delivered = 0;
        subs.retain(|sub| match sub.tx.try_send(event.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(asset_id, subscriber_id = %sub.id, "outbox full — event dropped for this subscriber");
                true
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        });
        delivered
    }

    /// Current subscriber count for one asset's channel.
    pub fn subscriber_count(&self, asset_id: &str) -> usize {
        self.channels.get(asset_id).map_or(0, |subs| subs.len())
    }

    /// Total live subscriptions across all channels.
    pub fn subscription_total(&self) -> usize {
        self.channels.iter().map(|e| e.value().len()).sum()
    }
}

impl Default for TelemetryHub {
    fn default() -> Self {
        Self::new()
    }
}
