mod app;
mod config;
mod error;
mod hub;
mod lifecycle;
mod registry;
mod relay;
mod room;
mod signaling;

pub use app::*;
pub use config::*;
pub use error::*;
pub use hub::*;
pub use lifecycle::*;
pub use registry::*;
pub use relay::*;
pub use room::*;
pub use signaling::*;
