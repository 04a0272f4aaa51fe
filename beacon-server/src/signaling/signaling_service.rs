use crate::router::RouterCommand;
use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use beacon_core::{ParticipantId, ServerMessage};
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, warn};

struct SignalingInner {
    connections: DashMap<ParticipantId, mpsc::UnboundedSender<Message>>,
}

/// Cloneable handle over the set of live WebSocket connections. Routes
/// serialized `ServerMessage`s to a specific participant's send task.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
    pub(crate) router_cmd_tx: mpsc::Sender<RouterCommand>,
}

impl SignalingService {
    pub fn new(router_cmd_tx: mpsc::Sender<RouterCommand>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                connections: DashMap::new(),
            }),
            router_cmd_tx,
        }
    }

    pub fn add_connection(
        &self,
        participant_id: ParticipantId,
        tx: mpsc::UnboundedSender<Message>,
    ) {
        self.inner.connections.insert(participant_id, tx);
    }

    pub fn remove_connection(&self, participant_id: &ParticipantId) {
        self.inner.connections.remove(participant_id);
    }

    pub fn send_message(&self, participant_id: ParticipantId, msg: ServerMessage) {
        if let Some(conn) = self.inner.connections.get(&participant_id) {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if let Err(e) = conn.send(Message::Text(json.into())) {
                        error!("Failed to send WS message to {participant_id}: {e}");
                    }
                }
                Err(e) => error!("Failed to serialize server message: {e}"),
            }
        } else {
            warn!("Attempted to send to disconnected participant {participant_id}");
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send_welcome(&self, to: ParticipantId) {
        self.send_message(to, ServerMessage::Welcome { participant_id: to });
    }

    async fn send_existing_participants(
        &self,
        to: ParticipantId,
        participants: Vec<ParticipantId>,
    ) {
        self.send_message(to, ServerMessage::ExistingParticipants { participants });
    }

    async fn send_participant_joined(&self, to: ParticipantId, joined: ParticipantId) {
        self.send_message(
            to,
            ServerMessage::ParticipantJoined {
                participant_id: joined,
            },
        );
    }

    async fn send_participant_left(&self, to: ParticipantId, left: ParticipantId) {
        self.send_message(
            to,
            ServerMessage::ParticipantLeft {
                participant_id: left,
            },
        );
    }

    async fn send_offer(&self, to: ParticipantId, from: ParticipantId, payload: Value) {
        self.send_message(to, ServerMessage::IncomingOffer { from, payload });
    }

    async fn send_answer(&self, to: ParticipantId, from: ParticipantId, payload: Value) {
        self.send_message(to, ServerMessage::IncomingAnswer { from, payload });
    }
}
