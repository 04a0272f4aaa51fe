use crate::registry::Registry;
use crate::router::RouterCommand;
use crate::signaling::SignalingOutput;
use beacon_core::{ParticipantId, RoomId};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// The relay's protocol state machine. Commands from every connection funnel
/// into one mpsc channel and are handled one at a time, which makes registry
/// mutation and notification dispatch for a single event atomic relative to
/// all other events.
pub struct SignalingRouter {
    registry: Registry,
    command_rx: mpsc::Receiver<RouterCommand>,
    outbound: Arc<dyn SignalingOutput>,
}

impl SignalingRouter {
    pub fn new(
        registry: Registry,
        command_rx: mpsc::Receiver<RouterCommand>,
        outbound: Arc<dyn SignalingOutput>,
    ) -> Self {
        Self {
            registry,
            command_rx,
            outbound,
        }
    }

    pub async fn run(mut self) {
        info!("Router event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!("Router event loop finished");
    }

    async fn handle_command(&mut self, cmd: RouterCommand) {
        match cmd {
            RouterCommand::Connect { participant_id } => self.handle_connect(participant_id).await,
            RouterCommand::Join {
                participant_id,
                room,
            } => self.handle_join(participant_id, room).await,
            RouterCommand::Signal { from, to, payload } => {
                self.forward_signal(from, to, payload).await;
            }
            RouterCommand::ReturnSignal { from, to, payload } => {
                self.forward_return_signal(from, to, payload).await;
            }
            RouterCommand::Disconnect { participant_id } => {
                self.handle_disconnect(participant_id).await;
            }
        }
    }

    async fn handle_connect(&mut self, participant_id: ParticipantId) {
        if let Err(e) = self.registry.register(participant_id) {
            // Identifiers are process-unique; a collision is a bug upstream.
            error!("Registry invariant breach on connect: {e}");
            debug_assert!(false, "{e}");
            return;
        }

        info!("Participant connected: {participant_id}");
        self.outbound.send_welcome(participant_id).await;
    }

    async fn handle_join(&mut self, participant_id: ParticipantId, room: RoomId) {
        let previous = match self.registry.set_room(participant_id, room.clone()) {
            Ok(previous) => previous,
            Err(e) => {
                error!("Registry invariant breach on join: {e}");
                debug_assert!(false, "{e}");
                return;
            }
        };

        // Re-join policy: a join while already in a room counts as a leave
        // followed by a fresh join, so the old room hears about the departure
        // before anyone hears about the arrival.
        if let Some(previous) = previous {
            info!("Participant {participant_id} left room '{previous}' by re-joining");
            self.broadcast_left(&previous, participant_id).await;
        }

        // One snapshot serves both the roster reply and the joined broadcast,
        // so the two can never disagree about who was present.
        let others = self.registry.members_of(&room, Some(&participant_id));

        info!(
            "Participant {participant_id} joined room '{room}' ({} already present)",
            others.len()
        );

        self.outbound
            .send_existing_participants(participant_id, others.clone())
            .await;

        for member in others {
            self.outbound
                .send_participant_joined(member, participant_id)
                .await;
        }
    }

    async fn forward_signal(&mut self, from: ParticipantId, to: ParticipantId, payload: Value) {
        if !self.registry.is_registered(&to) {
            debug!("Dropping signal from {from}: recipient {to} is gone");
            return;
        }

        self.outbound.send_offer(to, from, payload).await;
    }

    async fn forward_return_signal(
        &mut self,
        from: ParticipantId,
        to: ParticipantId,
        payload: Value,
    ) {
        if !self.registry.is_registered(&to) {
            debug!("Dropping return signal from {from}: recipient {to} is gone");
            return;
        }

        self.outbound.send_answer(to, from, payload).await;
    }

    async fn handle_disconnect(&mut self, participant_id: ParticipantId) {
        let room = self.registry.remove(&participant_id);
        info!("Participant disconnected: {participant_id}");

        if let Some(room) = room {
            self.broadcast_left(&room, participant_id).await;
        }
    }

    async fn broadcast_left(&self, room: &RoomId, departed: ParticipantId) {
        for member in self.registry.members_of(room, Some(&departed)) {
            self.outbound.send_participant_left(member, departed).await;
        }
    }
}
