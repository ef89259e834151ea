use crate::config::HubConfig;
use crate::error::HubError;
use crate::hub::{Hub, HubCommand, HubStats};
use crate::lifecycle::LifecycleManager;
use crate::relay::DedupGuard;
use crate::signaling::SignalingOutput;
use beacon_core::{ClientEvent, ConnectionId};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// Cloneable entry point to the hub task. The hub stops once every handle is dropped.
#[derive(Clone)]
pub struct HubHandle {
    command_tx: mpsc::Sender<HubCommand>,
}

impl HubHandle {
    /// Spawns the hub on the current runtime.
    pub fn spawn(output: Arc<dyn SignalingOutput>, config: &HubConfig) -> Self {
        let (command_tx, command_rx) = mpsc::channel(config.command_capacity.max(1));
        let answers = DedupGuard::new(config.dedup_capacity, config.dedup_evict_batch);
        let manager = LifecycleManager::new(output, answers);

        tokio::spawn(Hub::new(manager, command_rx).run());

        Self { command_tx }
    }

    pub async fn dispatch(
        &self,
        connection_id: ConnectionId,
        event: ClientEvent,
    ) -> Result<(), HubError> {
        self.send(HubCommand::Event {
            connection_id,
            event,
        })
        .await
    }

    pub async fn disconnect(&self, connection_id: ConnectionId) -> Result<(), HubError> {
        self.send(HubCommand::Disconnect { connection_id }).await
    }

    /// Resolves after every command queued before it has been processed.
    pub async fn stats(&self) -> Result<HubStats, HubError> {
        let (reply, rx) = oneshot::channel();
        self.send(HubCommand::Stats { reply }).await?;
        rx.await.map_err(|_| HubError::Closed)
    }

    async fn send(&self, cmd: HubCommand) -> Result<(), HubError> {
        self.command_tx.send(cmd).await.map_err(|_| HubError::Closed)
    }
}
