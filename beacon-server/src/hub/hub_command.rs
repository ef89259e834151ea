use beacon_core::{ClientEvent, ConnectionId};
use serde::Serialize;
use tokio::sync::oneshot;

/// Work submitted to the hub by socket tasks and HTTP handlers.
#[derive(Debug)]
pub enum HubCommand {
    /// A decoded frame from a socket.
    Event {
        connection_id: ConnectionId,
        event: ClientEvent,
    },

    /// The socket closed.
    Disconnect { connection_id: ConnectionId },

    /// Snapshot of registry and directory sizes.
    Stats { reply: oneshot::Sender<HubStats> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HubStats {
    pub connections: usize,
    pub rooms: usize,
}
