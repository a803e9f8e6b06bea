//! `chaintrace-telemetry` — per-asset publish/subscribe fan-out.
//!
//! Routes reading/anomaly events to live viewers and nothing else:
//! no persistence (durable history comes from ledger event queries),
//! no delivery guarantees beyond best-effort per subscriber. A slow
//! viewer loses its own copies; it never blocks the publisher or its
//! neighbours.

pub mod hub;
pub mod types;

pub use hub::{TelemetryHub, SUBSCRIBER_OUTBOX_CAPACITY};
pub use types::{TelemetryEvent, TelemetryEventKind};
