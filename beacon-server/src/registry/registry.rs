use beacon_core::{ParticipantId, RoomId};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("participant {0} is already registered")]
    AlreadyRegistered(ParticipantId),

    #[error("participant {0} is not registered")]
    NotRegistered(ParticipantId),
}

/// Authoritative map from each live participant to the room it has joined,
/// if any. Owned by the router task; the single-consumer command loop is the
/// only writer, so no internal locking is needed.
#[derive(Debug, Default)]
pub struct Registry {
    participants: HashMap<ParticipantId, Option<RoomId>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            participants: HashMap::new(),
        }
    }

    pub fn register(&mut self, participant_id: ParticipantId) -> Result<(), RegistryError> {
        if self.participants.contains_key(&participant_id) {
            return Err(RegistryError::AlreadyRegistered(participant_id));
        }

        self.participants.insert(participant_id, None);
        Ok(())
    }

    /// Associates a registered participant with a room, returning the room it
    /// previously occupied, if any.
    pub fn set_room(
        &mut self,
        participant_id: ParticipantId,
        room: RoomId,
    ) -> Result<Option<RoomId>, RegistryError> {
        match self.participants.get_mut(&participant_id) {
            Some(slot) => Ok(slot.replace(room)),
            None => Err(RegistryError::NotRegistered(participant_id)),
        }
    }

    /// Point-in-time snapshot of a room's membership. Ordering is unspecified.
    pub fn members_of(
        &self,
        room: &RoomId,
        excluding: Option<&ParticipantId>,
    ) -> Vec<ParticipantId> {
        self.participants
            .iter()
            .filter(|(id, joined)| joined.as_ref() == Some(room) && Some(*id) != excluding)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn is_registered(&self, participant_id: &ParticipantId) -> bool {
        self.participants.contains_key(participant_id)
    }

    /// Removes the participant entirely, returning the room it occupied so
    /// the caller can notify room-mates. Removing an unknown id is a no-op.
    pub fn remove(&mut self, participant_id: &ParticipantId) -> Option<RoomId> {
        self.participants.remove(participant_id).flatten()
    }
}
