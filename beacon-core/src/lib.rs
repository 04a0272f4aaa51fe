pub mod model;

pub use model::{ClientMessage, ParticipantId, RoomId, ServerMessage};
