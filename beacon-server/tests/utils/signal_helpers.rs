use anyhow::{Context, Result};
use beacon_core::{ClientEvent, ConnectionId, RoomId, ServerEvent, UserId};
use beacon_server::{HubHandle, HubStats};
use tokio::sync::mpsc;

use super::mock_signaling::Delivered;

/// Timeout for signal exchange operations (ms).
pub const SIGNAL_TIMEOUT_MS: u64 = 5000;

/// Waits until every command sent so far has been processed by the hub.
pub async fn settle(hub: &HubHandle) -> Result<HubStats> {
    hub.stats().await.context("Hub stopped")
}

pub async fn register_host(
    hub: &HubHandle,
    connection_id: ConnectionId,
    user_id: &str,
    room_id: &str,
) -> Result<()> {
    hub.dispatch(
        connection_id,
        ClientEvent::RegisterHost {
            user_id: UserId::from(user_id),
            room_id: RoomId::from(room_id),
        },
    )
    .await
    .context("Failed to send register-host")
}

pub async fn join_room(
    hub: &HubHandle,
    connection_id: ConnectionId,
    user_id: &str,
    room_id: &str,
) -> Result<()> {
    hub.dispatch(
        connection_id,
        ClientEvent::JoinRoom {
            user_id: UserId::from(user_id),
            room_id: RoomId::from(room_id),
        },
    )
    .await
    .context("Failed to send join-room")
}

/// Wait for the next event with the given wire name addressed to `to`,
/// skipping everything else.
pub async fn wait_for_event(
    signal_rx: &mut mpsc::UnboundedReceiver<Delivered>,
    to: &ConnectionId,
    name: &str,
    timeout_ms: u64,
) -> Result<ServerEvent> {
    let deadline = std::time::Duration::from_millis(timeout_ms);

    tokio::time::timeout(deadline, async {
        loop {
            match signal_rx.recv().await {
                Some(Delivered { to: id, event }) if &id == to && event.name() == name => {
                    return Ok::<ServerEvent, anyhow::Error>(event);
                }
                Some(_) => continue,
                None => anyhow::bail!("Signal channel closed"),
            }
        }
    })
    .await
    .with_context(|| format!("Timeout waiting for '{name}'"))?
}
