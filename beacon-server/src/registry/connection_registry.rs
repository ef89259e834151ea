use beacon_core::{ConnectionId, Role, RoomId, UserId};
use std::collections::HashMap;

/// What the server knows about one registered connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRecord {
    pub connection_id: ConnectionId,
    pub user_id: UserId,
    pub role: Role,
    /// When set, the room's member list contains `connection_id`.
    pub room_id: Option<RoomId>,
}

impl ConnectionRecord {
    pub fn new(connection_id: ConnectionId, user_id: UserId, role: Role) -> Self {
        Self {
            connection_id,
            user_id,
            role,
            room_id: None,
        }
    }

    pub fn in_room(mut self, room_id: RoomId) -> Self {
        self.room_id = Some(room_id);
        self
    }

    pub fn is_in(&self, room_id: &RoomId) -> bool {
        self.room_id.as_ref() == Some(room_id)
    }
}

/// Live connections that have sent `register-host` or `join-room`.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    records: HashMap<ConnectionId, ConnectionRecord>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the record for its connection. Last write wins.
    pub fn upsert(&mut self, record: ConnectionRecord) -> Option<ConnectionRecord> {
        self.records.insert(record.connection_id, record)
    }

    pub fn lookup(&self, connection_id: &ConnectionId) -> Option<&ConnectionRecord> {
        self.records.get(connection_id)
    }

    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<ConnectionRecord> {
        self.records.remove(connection_id)
    }

    /// Clears the room association of a connection that still points at `room_id`.
    pub fn detach_from_room(&mut self, connection_id: &ConnectionId, room_id: &RoomId) -> bool {
        match self.records.get_mut(connection_id) {
            Some(record) if record.is_in(room_id) => {
                record.room_id = None;
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
