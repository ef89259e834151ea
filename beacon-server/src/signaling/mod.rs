mod heartbeat;
mod signaling_output;
mod signaling_service;
mod ws_handler;

#[cfg(test)]
pub(crate) use recording_output::RecordingOutput;
pub use heartbeat::*;
pub use signaling_output::*;
pub use signaling_service::*;
pub use ws_handler::*;
