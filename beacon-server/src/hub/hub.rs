use crate::hub::HubCommand;
use crate::lifecycle::LifecycleManager;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// The single task that owns all signaling state.
///
/// Commands are processed one at a time, to completion, in arrival order.
pub struct Hub {
    manager: LifecycleManager,
    command_rx: mpsc::Receiver<HubCommand>,
}

impl Hub {
    pub fn new(manager: LifecycleManager, command_rx: mpsc::Receiver<HubCommand>) -> Self {
        Self {
            manager,
            command_rx,
        }
    }

    pub async fn run(mut self) {
        info!("Signaling hub started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!("Command channel closed. Shutting down hub.");
    }

    async fn handle_command(&mut self, cmd: HubCommand) {
        match cmd {
            HubCommand::Event {
                connection_id,
                event,
            } => {
                debug!("'{}' from {}", event.name(), connection_id);
                self.manager.handle_event(connection_id, event).await;
            }

            HubCommand::Disconnect { connection_id } => {
                self.manager.disconnect(connection_id).await;
            }

            HubCommand::Stats { reply } => {
                let _ = reply.send(self.manager.stats());
            }
        }
    }
}
