//! Ping/pong liveness for WebSocket sessions.
//!
//! A peer whose network vanishes without a close frame would otherwise keep
//! its session, and its room, open forever.

use axum::extract::ws::Message;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatSettings {
    /// Time between pings.
    pub interval: Duration,
    /// Silence tolerated before the peer is declared dead.
    pub timeout: Duration,
}

impl HeartbeatSettings {
    /// Consecutive silent intervals that end the session, at least one.
    pub fn max_missed(&self) -> u32 {
        let interval = self.interval.as_millis().max(1);
        let missed = self.timeout.as_millis().div_ceil(interval).max(1);
        u32::try_from(missed).unwrap_or(u32::MAX)
    }
}

/// Set by the receive side whenever any frame arrives, pongs included.
#[derive(Debug)]
pub struct Liveness(AtomicBool);

impl Liveness {
    pub fn new() -> Self {
        Self(AtomicBool::new(true))
    }

    pub fn mark_alive(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    fn take(&self) -> bool {
        self.0.swap(false, Ordering::Relaxed)
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatResult {
    /// The peer stayed silent for the whole timeout.
    TimedOut,
    /// The outbound channel closed; the session is already ending.
    Closed,
}

/// Pings the peer every interval through its outbound channel and returns
/// once it has been silent for `max_missed` intervals in a row.
pub async fn run_heartbeat(
    liveness: Arc<Liveness>,
    outbound: mpsc::UnboundedSender<Message>,
    settings: HeartbeatSettings,
) -> HeartbeatResult {
    let mut ticks = time::interval_at(Instant::now() + settings.interval, settings.interval);
    let max_missed = settings.max_missed();
    let mut missed = 0;

    loop {
        ticks.tick().await;

        if liveness.take() {
            missed = 0;
        } else {
            missed += 1;
            if missed >= max_missed {
                return HeartbeatResult::TimedOut;
            }
        }

        if outbound.send(Message::Ping(Default::default())).is_err() {
            return HeartbeatResult::Closed;
        }
    }
}
