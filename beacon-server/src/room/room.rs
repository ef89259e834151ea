use beacon_core::{ConnectionId, RoomId};

/// Ordered membership of one room. Roles are not stored here; they are
/// always read from the connection registry.
#[derive(Debug, Clone)]
pub struct Room {
    room_id: RoomId,
    members: Vec<ConnectionId>,
}

impl Room {
    pub fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            members: Vec::new(),
        }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn members(&self) -> &[ConnectionId] {
        &self.members
    }

    pub fn into_members(self) -> Vec<ConnectionId> {
        self.members
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.members.contains(connection_id)
    }

    /// Appends unless already present, keeping first-insertion order.
    pub fn add_member(&mut self, connection_id: ConnectionId) -> bool {
        if self.contains(&connection_id) {
            return false;
        }
        self.members.push(connection_id);
        true
    }

    pub fn remove_member(&mut self, connection_id: &ConnectionId) -> bool {
        let before = self.members.len();
        self.members.retain(|id| id != connection_id);
        self.members.len() != before
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
