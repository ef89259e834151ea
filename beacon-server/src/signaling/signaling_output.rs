use async_trait::async_trait;
use beacon_core::{ConnectionId, ServerEvent};

/// Outbound side of the transport, as seen by the hub.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Hands an event to the connection's socket. Returns `false` when the
    /// connection is no longer live; the event is then dropped.
    async fn send_event(&self, to: ConnectionId, event: ServerEvent) -> bool;
}
