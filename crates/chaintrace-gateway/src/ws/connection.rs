//! Live telemetry over WebSocket — GET /ws.
//!
//! Clients declare interest per asset with subscribe/unsubscribe
//! frames; the server pushes `reading` and `anomaly` events for the
//! subscribed assets. All of a connection's subscriptions die with it.

use axum::{
    extract::{ws::Message, ws::WebSocket, State, WebSocketUpgrade},
    response::IntoResponse,
};
use chaintrace_telemetry::{TelemetryEvent, SUBSCRIBER_OUTBOX_CAPACITY};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::app::AppState;

/// Client → server frames.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ClientFrame {
    Subscribe { asset_id: String },
    Unsubscribe { asset_id: String },
}

/// Axum handler — upgrades HTTP to WebSocket at GET /ws.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| run_connection(socket, state))
}

/// Per-connection event loop — lives for the entire WS session.
///
/// The hub writes into this connection's bounded outbox; the loop
/// pumps the outbox onto the socket. A viewer that cannot keep up
/// loses copies at the hub, never here.
async fn run_connection(socket: WebSocket, state: Arc<AppState>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    info!(conn_id = %conn_id, "viewer connected");

    let (mut sink, mut stream) = socket.split();
    let (event_tx, mut event_rx) = mpsc::channel::<TelemetryEvent>(SUBSCRIBER_OUTBOX_CAPACITY);

    loop {
        tokio::select! {
            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        handle_frame(&conn_id, &text, &state, &event_tx);
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }

            event = event_rx.recv() => {
                // The loop holds a sender, so recv can't return None.
                let Some(event) = event else { break };
                let payload = match serde_json::to_string(&event) {
                    Ok(p) => p,
                    Err(e) => {
                        warn!(conn_id = %conn_id, error = %e, "unserializable event dropped");
                        continue;
                    }
                };
                if sink.send(Message::Text(payload.into())).await.is_err() {
                    break;
                }
            }
        }
    }

    state.hub.drop_subscriber(&conn_id);
    info!(conn_id = %conn_id, "viewer disconnected");
}

fn handle_frame(
    conn_id: &str,
    text: &str,
    state: &Arc<AppState>,
    event_tx: &mpsc::Sender<TelemetryEvent>,
) {
    match serde_json::from_str::<ClientFrame>(text) {
        Ok(ClientFrame::Subscribe { asset_id }) => {
            state.hub.subscribe(&asset_id, conn_id, event_tx.clone());
            info!(conn_id, asset_id = %asset_id, "viewer subscribed");
        }
        Ok(ClientFrame::Unsubscribe { asset_id }) => {
            state.hub.unsubscribe(&asset_id, conn_id);
            info!(conn_id, asset_id = %asset_id, "viewer unsubscribed");
        }
        Err(e) => {
            warn!(conn_id, error = %e, "malformed frame ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_frame_parses() {
        let frame: ClientFrame =
            serde_json::from_str(r#"{"action":"subscribe","asset_id":"0xA1"}"#).unwrap();
        assert!(matches!(frame, ClientFrame::Subscribe { asset_id } if asset_id == "0xA1"));
    }

    #[test]
    fn unsubscribe_frame_parses() {
        let frame: ClientFrame =
            serde_json::from_str(r#"{"action":"unsubscribe","asset_id":"0xB2"}"#).unwrap();
        assert!(matches!(frame, ClientFrame::Unsubscribe { asset_id } if asset_id == "0xB2"));
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(serde_json::from_str::<ClientFrame>(r#"{"action":"shout"}"#).is_err());
    }
}
