use crate::registry::ConnectionRegistry;
use crate::room::Room;
use beacon_core::{ConnectionId, RoomId};
use std::collections::HashMap;
use tracing::warn;

/// All rooms that currently have a host.
#[derive(Debug, Default)]
pub struct RoomDirectory {
    rooms: HashMap<RoomId, Room>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_or_get(&mut self, room_id: &RoomId) -> &mut Room {
        self.rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::new(room_id.clone()))
    }

    /// Returns `false` when the room does not exist or already lists the connection.
    pub fn add_member(&mut self, room_id: &RoomId, connection_id: ConnectionId) -> bool {
        self.rooms
            .get_mut(room_id)
            .is_some_and(|room| room.add_member(connection_id))
    }

    pub fn remove_member(&mut self, room_id: &RoomId, connection_id: &ConnectionId) -> bool {
        self.rooms
            .get_mut(room_id)
            .is_some_and(|room| room.remove_member(connection_id))
    }

    /// First member whose registry record has the host role.
    ///
    /// Linear in the member count, which stays small for a signaling fan-out.
    pub fn find_host(
        &self,
        room_id: &RoomId,
        registry: &ConnectionRegistry,
    ) -> Option<ConnectionId> {
        let room = self.rooms.get(room_id)?;

        room.members().iter().copied().find(|id| match registry.lookup(id) {
            Some(record) => record.role.is_host(),
            None => {
                debug_assert!(false, "room {room_id} lists unregistered connection {id}");
                warn!("Room '{}' lists unregistered connection {}", room_id, id);
                false
            }
        })
    }

    pub fn delete_room(&mut self, room_id: &RoomId) -> Option<Room> {
        self.rooms.remove(room_id)
    }

    pub fn get(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
