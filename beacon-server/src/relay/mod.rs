mod dedup_guard;
mod signaling_relay;

pub use dedup_guard::*;
pub use signaling_relay::*;
