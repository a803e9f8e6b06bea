// Delivery semantics of the telemetry hub: same-channel ordering,
// cross-channel isolation, bounded outboxes, disconnect cleanup.

use chaintrace_core::{Reading, SensorKind};
use chaintrace_telemetry::{TelemetryEvent, TelemetryHub, SUBSCRIBER_OUTBOX_CAPACITY};
use tokio::sync::mpsc;

fn reading(value: i64) -> Reading {
    Reading {
        sensor_id: "temperature-sensor-0xa1".into(),
        timestamp: 1_700_000_000_000 + value,
        kind: SensorKind::Temperature,
        value,
        unit: "celsius".into(),
        is_anomaly: false,
    }
}

#[tokio::test]
async fn two_subscribers_see_every_event_in_the_same_order() {
    let hub = TelemetryHub::new();
    let (tx_a, mut rx_a) = mpsc::channel(SUBSCRIBER_OUTBOX_CAPACITY);
    let (tx_b, mut rx_b) = mpsc::channel(SUBSCRIBER_OUTBOX_CAPACITY);
    hub.subscribe("0xA1", "conn-a", tx_a);
    hub.subscribe("0xA1", "conn-b", tx_b);

    for v in 0..5 {
        assert_eq!(hub.publish("0xA1", TelemetryEvent::reading("0xA1", reading(v))), 2);
    }

    for rx in [&mut rx_a, &mut rx_b] {
        let values: Vec<i64> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|e| e.reading.value)
            .collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }
}

#[tokio::test]
async fn other_channels_receive_nothing() {
    let hub = TelemetryHub::new();
    let (tx_a, mut rx_a) = mpsc::channel(8);
    let (tx_b, mut rx_b) = mpsc::channel(8);
    hub.subscribe("0xA1", "conn-a", tx_a);
    hub.subscribe("0xB2", "conn-b", tx_b);

    hub.publish("0xA1", TelemetryEvent::reading("0xA1", reading(1)));

    assert!(rx_a.try_recv().is_ok());
    assert!(rx_b.try_recv().is_err());
}

#[tokio::test]
async fn publish_to_zero_subscribers_is_a_noop() {
    let hub = TelemetryHub::new();
    assert_eq!(hub.publish("0xA1", TelemetryEvent::reading("0xA1", reading(1))), 0);
}

#[tokio::test]
async fn unsubscribe_stops_delivery() {
    let hub = TelemetryHub::new();
    let (tx, mut rx) = mpsc::channel(8);
    hub.subscribe("0xA1", "conn-a", tx);
    hub.unsubscribe("0xA1", "conn-a");

    assert_eq!(hub.publish("0xA1", TelemetryEvent::reading("0xA1", reading(1))), 0);
    assert!(rx.try_recv().is_err());
    assert_eq!(hub.subscriber_count("0xA1"), 0);
}

#[tokio::test]
async fn unsubscribing_a_never_subscribed_pair_is_not_an_error() {
    let hub = TelemetryHub::new();
    hub.unsubscribe("0xA1", "ghost");
}

#[tokio::test]
async fn drop_subscriber_clears_every_channel() {
    let hub = TelemetryHub::new();
    let (tx, _rx) = mpsc::channel(8);
    hub.subscribe("0xA1", "conn-a", tx.clone());
    hub.subscribe("0xB2", "conn-a", tx);
    assert_eq!(hub.subscription_total(), 2);

    hub.drop_subscriber("conn-a");
    assert_eq!(hub.subscription_total(), 0);
}

#[tokio::test]
async fn full_outbox_drops_only_that_subscribers_copy() {
    let hub = TelemetryHub::new();
    let (tx_slow, mut rx_slow) = mpsc::channel(1);
    let (tx_fast, mut rx_fast) = mpsc::channel(8);
    hub.subscribe("0xA1", "slow", tx_slow);
    hub.subscribe("0xA1", "fast", tx_fast);

    for v in 0..3 {
        hub.publish("0xA1", TelemetryEvent::reading("0xA1", reading(v)));
    }

    // The slow subscriber kept only the first event; the fast one got all.
    assert_eq!(rx_slow.try_recv().unwrap().reading.value, 0);
    assert!(rx_slow.try_recv().is_err());
    let fast: Vec<i64> = std::iter::from_fn(|| rx_fast.try_recv().ok())
        .map(|e| e.reading.value)
        .collect();
    assert_eq!(fast, vec![0, 1, 2]);

    // The slow subscriber is still registered — dropping copies is not eviction.
    assert_eq!(hub.subscriber_count("0xA1"), 2);
}

#[tokio::test]
async fn closed_outbox_prunes_the_subscriber() {
    let hub = TelemetryHub::new();
    let (tx, rx) = mpsc::channel(8);
    hub.subscribe("0xA1", "gone", tx);
    drop(rx);

    assert_eq!(hub.publish("0xA1", TelemetryEvent::reading("0xA1", reading(1))), 0);
    assert_eq!(hub.subscriber_count("0xA1"), 0);
}

#[tokio::test]
async fn resubscribe_replaces_the_old_outbox() {
    let hub = TelemetryHub::new();
    let (tx_old, mut rx_old) = mpsc::channel(8);
    let (tx_new, mut rx_new) = mpsc::channel(8);
    hub.subscribe("0xA1", "conn-a", tx_old);
    hub.subscribe("0xA1", "conn-a", tx_new);

    assert_eq!(hub.publish("0xA1", TelemetryEvent::reading("0xA1", reading(7))), 1);
    assert!(rx_old.try_recv().is_err());
    assert_eq!(rx_new.try_recv().unwrap().reading.value, 7);
}
