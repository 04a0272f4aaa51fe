use crate::router::RouterCommand;
use crate::signaling::SignalingService;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use beacon_core::{ClientMessage, ParticipantId};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    // Identifiers are assigned here, once per connection, never by the client.
    let participant_id = ParticipantId::new();

    ws.on_upgrade(move |socket| handle_socket(socket, participant_id, service))
}

async fn handle_socket(socket: WebSocket, participant_id: ParticipantId, service: SignalingService) {
    info!("New WebSocket connection: {participant_id}");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.add_connection(participant_id, tx);

    if service
        .router_cmd_tx
        .send(RouterCommand::Connect { participant_id })
        .await
        .is_err()
    {
        error!("Router is gone, closing connection {participant_id}");
        service.remove_connection(&participant_id);
        return;
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(request) => {
                            let cmd = command_for(participant_id, request);
                            if let Err(e) = service.router_cmd_tx.send(cmd).await {
                                error!("Router died: {e}");
                                break;
                            }
                        }
                        // Malformed requests stop here; nothing reaches the router.
                        Err(e) => warn!("Invalid message from {participant_id}: {e:?}"),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    service.remove_connection(&participant_id);

    // Sent exactly once per connection, whichever task ended first.
    let _ = service
        .router_cmd_tx
        .send(RouterCommand::Disconnect { participant_id })
        .await;

    info!("WebSocket disconnected: {participant_id}");
}

fn command_for(participant_id: ParticipantId, request: ClientMessage) -> RouterCommand {
    match request {
        ClientMessage::Join { room } => RouterCommand::Join {
            participant_id,
            room,
        },
        // The sender identity is attached here, never taken from the client.
        ClientMessage::Signal { to, payload } => RouterCommand::Signal {
            from: participant_id,
            to,
            payload,
        },
        ClientMessage::ReturnSignal { to, payload } => RouterCommand::ReturnSignal {
            from: participant_id,
            to,
            payload,
        },
    }
}
