use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The single connection broadcasting media in a room.
    Host,
    /// A connection subscribed to a host's room.
    Viewer,
}

impl Role {
    pub fn is_host(self) -> bool {
        matches!(self, Role::Host)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Host => f.write_str("host"),
            Role::Viewer => f.write_str("viewer"),
        }
    }
}
