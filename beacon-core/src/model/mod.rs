mod participant;
mod protocol;
mod room;

pub use participant::ParticipantId;
pub use protocol::{ClientMessage, ServerMessage};
pub use room::RoomId;
