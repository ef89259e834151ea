use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque handle of one live duplex channel. Assigned by the server when the
/// socket is accepted; a reconnecting client always gets a new one.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for ConnectionId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ProtocolError::InvalidConnectionId(s.to_string()))
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Connection id as a client addressed it in a relay frame.
///
/// Kept as the raw string so a malformed id reaches the relay and is treated
/// like any other socket that is not connected.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct SocketTarget(pub String);

impl SocketTarget {
    /// The addressed connection, or `None` when the id is not one this server
    /// could have issued.
    pub fn resolve(&self) -> Option<ConnectionId> {
        self.0.parse().ok()
    }
}

impl From<ConnectionId> for SocketTarget {
    fn from(id: ConnectionId) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for SocketTarget {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for SocketTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
