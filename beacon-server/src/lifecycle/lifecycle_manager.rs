use crate::hub::HubStats;
use crate::registry::{ConnectionRecord, ConnectionRegistry};
use crate::relay::{AnswerKey, DedupGuard, RelayKind, SignalingRelay};
use crate::room::RoomDirectory;
use crate::signaling::SignalingOutput;
use beacon_core::{ClientEvent, ConnectionId, Role, RoomId, ServerEvent, UserId};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Owns the registry, the room directory and the relay, and drives every
/// connection through `Unregistered -> Registered(Host | Viewer) -> Disconnected`.
///
/// Not thread-safe by itself; the hub gives it exclusive access.
pub struct LifecycleManager {
    registry: ConnectionRegistry,
    rooms: RoomDirectory,
    relay: SignalingRelay,
    output: Arc<dyn SignalingOutput>,
}

impl LifecycleManager {
    pub fn new(output: Arc<dyn SignalingOutput>, answers: DedupGuard<AnswerKey>) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            rooms: RoomDirectory::new(),
            relay: SignalingRelay::new(output.clone(), answers),
            output,
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn rooms(&self) -> &RoomDirectory {
        &self.rooms
    }

    pub fn stats(&self) -> HubStats {
        HubStats {
            connections: self.registry.len(),
            rooms: self.rooms.len(),
        }
    }

    pub async fn handle_event(&mut self, connection_id: ConnectionId, event: ClientEvent) {
        match event {
            ClientEvent::RegisterHost { user_id, room_id } => {
                self.register_host(connection_id, user_id, room_id).await;
            }
            ClientEvent::JoinRoom { user_id, room_id } => {
                self.join_room(connection_id, user_id, room_id).await;
            }
            ClientEvent::Offer {
                offer,
                target_socket_id,
            } => {
                self.relay
                    .relay(RelayKind::Offer, offer, target_socket_id, connection_id)
                    .await;
            }
            ClientEvent::Answer {
                answer,
                target_socket_id,
                message_id,
            } => {
                self.relay
                    .relay_answer(answer, target_socket_id, connection_id, message_id)
                    .await;
            }
            ClientEvent::IceCandidate {
                candidate,
                target_socket_id,
            } => {
                self.relay
                    .relay(
                        RelayKind::IceCandidate,
                        candidate,
                        target_socket_id,
                        connection_id,
                    )
                    .await;
            }
        }
    }

    pub async fn register_host(
        &mut self,
        connection_id: ConnectionId,
        user_id: UserId,
        room_id: RoomId,
    ) {
        info!("Host {} ({}) registering room '{}'", user_id, connection_id, room_id);

        if let Some(previous) = self.registry.lookup(&connection_id).cloned() {
            if previous.role.is_host() && previous.is_in(&room_id) {
                self.registry.upsert(
                    ConnectionRecord::new(connection_id, user_id, Role::Host).in_room(room_id.clone()),
                );
                self.emit(connection_id, ServerEvent::HostRegistered { room_id })
                    .await;
                return;
            }
            self.detach(&previous).await;
        }

        if let Some(host) = self.rooms.find_host(&room_id, &self.registry) {
            warn!(
                "Room '{}' already hosted by {}, refusing {}",
                room_id, host, connection_id
            );
            self.registry
                .upsert(ConnectionRecord::new(connection_id, user_id, Role::Host));
            self.emit(connection_id, ServerEvent::RoomOccupied { room_id })
                .await;
            return;
        }

        self.registry.upsert(
            ConnectionRecord::new(connection_id, user_id, Role::Host).in_room(room_id.clone()),
        );
        self.rooms.create_or_get(&room_id);
        self.rooms.add_member(&room_id, connection_id);

        self.emit(connection_id, ServerEvent::HostRegistered { room_id })
            .await;
    }

    pub async fn join_room(&mut self, connection_id: ConnectionId, user_id: UserId, room_id: RoomId) {
        info!("Viewer {} ({}) joining room '{}'", user_id, connection_id, room_id);

        if let Some(previous) = self.registry.lookup(&connection_id).cloned() {
            if !previous.role.is_host() && previous.is_in(&room_id) {
                self.registry.upsert(
                    ConnectionRecord::new(connection_id, user_id, Role::Viewer).in_room(room_id.clone()),
                );
                self.emit(connection_id, ServerEvent::JoinedRoom { room_id })
                    .await;
                return;
            }
            self.detach(&previous).await;
        }

        let record = ConnectionRecord::new(connection_id, user_id.clone(), Role::Viewer);

        if !self.rooms.contains(&room_id) {
            self.registry.upsert(record);
            info!("Room '{}' not found for {}", room_id, connection_id);
            self.emit(connection_id, ServerEvent::RoomNotFound {}).await;
            return;
        }

        self.registry.upsert(record.in_room(room_id.clone()));
        self.rooms.add_member(&room_id, connection_id);

        if let Some(host) = self.rooms.find_host(&room_id, &self.registry) {
            self.emit(
                host,
                ServerEvent::ViewerJoined {
                    viewer_id: user_id,
                    viewer_socket_id: connection_id,
                },
            )
            .await;
        }

        self.emit(connection_id, ServerEvent::JoinedRoom { room_id })
            .await;
    }

    pub async fn disconnect(&mut self, connection_id: ConnectionId) {
        let Some(record) = self.registry.remove(&connection_id) else {
            debug!("Unregistered socket {} closed", connection_id);
            return;
        };

        info!(
            "{} {} ({}) disconnected",
            record.role, record.user_id, connection_id
        );
        self.detach(&record).await;
    }

    /// Takes a connection out of its room and tells whoever is left.
    ///
    /// A departing host deletes the room: every remaining member receives
    /// `host-disconnected` and keeps its registration without a room. A
    /// departing viewer is announced to the host.
    async fn detach(&mut self, record: &ConnectionRecord) {
        let Some(room_id) = record.room_id.as_ref() else {
            return;
        };

        if !self.rooms.remove_member(room_id, &record.connection_id) {
            debug_assert!(
                false,
                "{} points at room {} which does not list it",
                record.connection_id, room_id
            );
            warn!(
                "Connection {} points at room '{}' which does not list it, skipping teardown",
                record.connection_id, room_id
            );
            return;
        }

        match record.role {
            Role::Host => {
                let orphans = self
                    .rooms
                    .delete_room(room_id)
                    .map(|room| room.into_members())
                    .unwrap_or_default();

                info!(
                    "Room '{}' closed, notifying {} viewer(s)",
                    room_id,
                    orphans.len()
                );

                for member in orphans {
                    self.registry.detach_from_room(&member, room_id);
                    self.emit(member, ServerEvent::HostDisconnected {}).await;
                }
            }
            Role::Viewer => {
                if let Some(host) = self.rooms.find_host(room_id, &self.registry) {
                    self.emit(
                        host,
                        ServerEvent::ViewerDisconnected {
                            viewer_id: record.user_id.clone(),
                            viewer_socket_id: record.connection_id,
                        },
                    )
                    .await;
                }
            }
        }
    }

    async fn emit(&self, to: ConnectionId, event: ServerEvent) {
        let name = event.name();
        if !self.output.send_event(to, event).await {
            debug!("'{}' for {} dropped, socket already gone", name, to);
        }
    }
}
