use crate::app::AppState;
use crate::signaling::{HeartbeatResult, Liveness, run_heartbeat};
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use beacon_core::{ClientEvent, ConnectionId, ServerEvent};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let connection_id = ConnectionId::new();

    ws.on_upgrade(move |socket| handle_socket(socket, connection_id, state))
}

async fn handle_socket(socket: WebSocket, connection_id: ConnectionId, state: Arc<AppState>) {
    info!("New connection: {}", connection_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    state.signaling.add_peer(connection_id, tx.clone());
    state.signaling.send_signal(
        connection_id,
        &ServerEvent::Connected {
            socket_id: connection_id,
        },
    );

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let liveness = Arc::new(Liveness::new());
    let mut heartbeat_task = tokio::spawn(run_heartbeat(liveness.clone(), tx, state.heartbeat));

    let mut recv_task = tokio::spawn({
        let hub = state.hub.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                liveness.mark_alive();
                match msg {
                    Message::Text(text) => match ClientEvent::from_json(text.as_str()) {
                        Ok(event) => {
                            if let Err(e) = hub.dispatch(connection_id, event).await {
                                error!("Hub died: {}", e);
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid frame from {}: {}", connection_id, e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => {}
        _ = (&mut recv_task) => {}
        result = (&mut heartbeat_task) => {
            if let Ok(HeartbeatResult::TimedOut) = result {
                warn!("No sign of life from {}, closing", connection_id);
            }
        }
    };
    send_task.abort();
    recv_task.abort();
    heartbeat_task.abort();

    state.signaling.remove_peer(&connection_id);
    if let Err(e) = state.hub.disconnect(connection_id).await {
        warn!("Could not report disconnect of {}: {}", connection_id, e);
    }
    info!("Disconnected: {}", connection_id);
}
