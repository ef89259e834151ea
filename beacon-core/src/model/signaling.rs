use crate::error::ProtocolError;
use crate::model::connection::{ConnectionId, SocketTarget};
use crate::model::room::RoomId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Events a client sends over its socket.
///
/// Frames are JSON envelopes `{"event": "<name>", "data": {...}}`. Negotiation
/// payloads (`offer`, `answer`, `candidate`) are kept as raw JSON and never
/// inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    RegisterHost {
        user_id: UserId,
        room_id: RoomId,
    },
    JoinRoom {
        user_id: UserId,
        room_id: RoomId,
    },
    Offer {
        offer: Value,
        target_socket_id: SocketTarget,
    },
    Answer {
        answer: Value,
        target_socket_id: SocketTarget,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
    },
    IceCandidate {
        candidate: Value,
        target_socket_id: SocketTarget,
    },
}

impl ClientEvent {
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Wire name of the event, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::RegisterHost { .. } => "register-host",
            ClientEvent::JoinRoom { .. } => "join-room",
            ClientEvent::Offer { .. } => "offer",
            ClientEvent::Answer { .. } => "answer",
            ClientEvent::IceCandidate { .. } => "ice-candidate",
        }
    }
}

/// Events the server pushes to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    /// First frame on every socket: tells the client its own connection id.
    Connected {
        socket_id: ConnectionId,
    },
    HostRegistered {
        room_id: RoomId,
    },
    /// The room already has a live host; the registration was refused.
    RoomOccupied {
        room_id: RoomId,
    },
    JoinedRoom {
        room_id: RoomId,
    },
    RoomNotFound {},
    ViewerJoined {
        viewer_id: UserId,
        viewer_socket_id: ConnectionId,
    },
    ViewerDisconnected {
        viewer_id: UserId,
        viewer_socket_id: ConnectionId,
    },
    HostDisconnected {},
    Offer {
        offer: Value,
        from: ConnectionId,
    },
    Answer {
        answer: Value,
        from: ConnectionId,
    },
    IceCandidate {
        candidate: Value,
        from: ConnectionId,
    },
}

impl ServerEvent {
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Connected { .. } => "connected",
            ServerEvent::HostRegistered { .. } => "host-registered",
            ServerEvent::RoomOccupied { .. } => "room-occupied",
            ServerEvent::JoinedRoom { .. } => "joined-room",
            ServerEvent::RoomNotFound {} => "room-not-found",
            ServerEvent::ViewerJoined { .. } => "viewer-joined",
            ServerEvent::ViewerDisconnected { .. } => "viewer-disconnected",
            ServerEvent::HostDisconnected {} => "host-disconnected",
            ServerEvent::Offer { .. } => "offer",
            ServerEvent::Answer { .. } => "answer",
            ServerEvent::IceCandidate { .. } => "ice-candidate",
        }
    }
}
