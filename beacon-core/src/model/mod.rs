mod connection;
mod role;
mod room;
mod signaling;
mod user;

pub use connection::{ConnectionId, SocketTarget};
pub use role::Role;
pub use room::RoomId;
pub use signaling::{ClientEvent, ServerEvent};
pub use user::UserId;
