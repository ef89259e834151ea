use crate::relay::{DedupGuard, DedupVerdict};
use crate::signaling::SignalingOutput;
use beacon_core::{ConnectionId, ServerEvent, SocketTarget};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Answers are deduplicated per sender, so two clients picking the same
/// message id never suppress each other.
pub type AnswerKey = (ConnectionId, String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayKind {
    Offer,
    Answer,
    IceCandidate,
}

impl RelayKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelayKind::Offer => "offer",
            RelayKind::Answer => "answer",
            RelayKind::IceCandidate => "ice-candidate",
        }
    }

    fn into_event(self, payload: Value, from: ConnectionId) -> ServerEvent {
        match self {
            RelayKind::Offer => ServerEvent::Offer {
                offer: payload,
                from,
            },
            RelayKind::Answer => ServerEvent::Answer {
                answer: payload,
                from,
            },
            RelayKind::IceCandidate => ServerEvent::IceCandidate {
                candidate: payload,
                from,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    Delivered,
    Duplicate,
    TargetUnreachable,
}

/// Forwards negotiation payloads between two sockets without looking inside them.
pub struct SignalingRelay {
    output: Arc<dyn SignalingOutput>,
    answers: DedupGuard<AnswerKey>,
}

impl SignalingRelay {
    pub fn new(output: Arc<dyn SignalingOutput>, answers: DedupGuard<AnswerKey>) -> Self {
        Self { output, answers }
    }

    /// Best effort: an unreachable target is not reported back to the sender.
    /// A target id this server never issues counts as unreachable.
    pub async fn relay(
        &self,
        kind: RelayKind,
        payload: Value,
        target: SocketTarget,
        sender: ConnectionId,
    ) -> RelayOutcome {
        let delivered = match target.resolve() {
            Some(to) => {
                self.output
                    .send_event(to, kind.into_event(payload, sender))
                    .await
            }
            None => false,
        };

        if delivered {
            debug!("Relayed {} from {} to {}", kind.as_str(), sender, target);
            RelayOutcome::Delivered
        } else {
            debug!(
                "Dropped {} from {}: target {} is not connected",
                kind.as_str(),
                sender,
                target
            );
            RelayOutcome::TargetUnreachable
        }
    }

    /// Relays an answer unless the same sender already sent this message id.
    ///
    /// Answers without an id skip the guard and are always relayed; clients
    /// that never set `messageId` would otherwise lose every answer after
    /// their first.
    pub async fn relay_answer(
        &mut self,
        payload: Value,
        target: SocketTarget,
        sender: ConnectionId,
        message_id: Option<String>,
    ) -> RelayOutcome {
        if let Some(message_id) = message_id {
            if self.answers.check_and_mark((sender, message_id.clone())) == DedupVerdict::Duplicate
            {
                debug!("Suppressed duplicate answer '{}' from {}", message_id, sender);
                return RelayOutcome::Duplicate;
            }
        }

        self.relay(RelayKind::Answer, payload, target, sender).await
    }
}
