use crate::model::participant::ParticipantId;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Messages a connected client may send to the relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", content = "d")]
pub enum ClientMessage {
    Join {
        room: RoomId,
    },
    Signal {
        to: ParticipantId,
        payload: Value,
    },
    ReturnSignal {
        to: ParticipantId,
        payload: Value,
    },
}

/// Messages the relay sends to a connected client. Signaling payloads are
/// relayed verbatim; `from` is always the relay-assigned sender identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", content = "d")]
pub enum ServerMessage {
    Welcome {
        participant_id: ParticipantId,
    },
    ExistingParticipants {
        participants: Vec<ParticipantId>,
    },
    ParticipantJoined {
        participant_id: ParticipantId,
    },
    ParticipantLeft {
        participant_id: ParticipantId,
    },
    IncomingOffer {
        from: ParticipantId,
        payload: Value,
    },
    IncomingAnswer {
        from: ParticipantId,
        payload: Value,
    },
}
