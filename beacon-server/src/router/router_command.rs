use beacon_core::{ParticipantId, RoomId};
use serde_json::Value;

/// Events flowing from the connection layer into the router loop.
#[derive(Debug)]
pub enum RouterCommand {
    /// A connection was established and assigned a fresh identifier.
    Connect { participant_id: ParticipantId },

    /// The participant asked to join a room.
    Join {
        participant_id: ParticipantId,
        room: RoomId,
    },

    /// Directed signaling payload, offer leg.
    Signal {
        from: ParticipantId,
        to: ParticipantId,
        payload: Value,
    },

    /// Directed signaling payload, answer leg.
    ReturnSignal {
        from: ParticipantId,
        to: ParticipantId,
        payload: Value,
    },

    /// The underlying connection terminated.
    Disconnect { participant_id: ParticipantId },
}
