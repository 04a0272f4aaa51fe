use async_trait::async_trait;
use beacon_core::ParticipantId;
use serde_json::Value;

/// Implemented by the transport layer so the router can push notifications
/// to a specific connection. Delivery is best-effort: sending to a
/// participant that is no longer connected is a no-op.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Tell a fresh connection the identifier it was assigned.
    async fn send_welcome(&self, to: ParticipantId);

    /// Answer a joiner with the members already in its room.
    async fn send_existing_participants(
        &self,
        to: ParticipantId,
        participants: Vec<ParticipantId>,
    );

    async fn send_participant_joined(&self, to: ParticipantId, joined: ParticipantId);

    async fn send_participant_left(&self, to: ParticipantId, left: ParticipantId);

    /// Deliver a forwarded offer-leg payload with its true sender.
    async fn send_offer(&self, to: ParticipantId, from: ParticipantId, payload: Value);

    /// Deliver a forwarded answer-leg payload with its true sender.
    async fn send_answer(&self, to: ParticipantId, from: ParticipantId, payload: Value);
}
