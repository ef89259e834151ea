use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use beacon_core::{ConnectionId, ServerEvent};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};

struct SignalingInner {
    peers: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
}

/// Outbound channel of every open socket, keyed by connection id.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                peers: DashMap::new(),
            }),
        }
    }

    pub fn add_peer(&self, connection_id: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.peers.insert(connection_id, tx);
    }

    pub fn remove_peer(&self, connection_id: &ConnectionId) {
        self.inner.peers.remove(connection_id);
    }

    pub fn send_signal(&self, connection_id: ConnectionId, event: &ServerEvent) -> bool {
        let Some(peer) = self.inner.peers.get(&connection_id) else {
            debug!(
                "Dropping '{}' for disconnected socket {}",
                event.name(),
                connection_id
            );
            return false;
        };

        let json = match event.to_json() {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize '{}': {}", event.name(), e);
                return false;
            }
        };

        if peer.send(Message::Text(json.into())).is_err() {
            debug!("Socket {} is closing, '{}' dropped", connection_id, event.name());
            return false;
        }
        true
    }
}

impl Default for SignalingService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send_event(&self, to: ConnectionId, event: ServerEvent) -> bool {
        self.send_signal(to, &event)
    }
}
