//! WebSocket Connection Handler
//!
//! Reads client events from one connection and relays them to the other
//! members of the targeted session.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use super::gateway::Gateway;
use super::messages::{ClientEvent, ServerEvent};
use crate::domain::{ConnectionId, Participant};
use crate::infrastructure::metrics;
use crate::startup::AppState;

/// WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let max_message_size = state.settings.websocket.max_message_size;
    let max_frame_size = state.settings.websocket.max_frame_size;
    let gateway = state.gateway.clone();

    ws.max_message_size(max_message_size)
        .max_frame_size(max_frame_size)
        .on_upgrade(move |socket| handle_socket(socket, gateway))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, gateway: Arc<Gateway>) {
    let connection_id = ConnectionId::new();

    // Split socket for concurrent read/write
    let (mut sender, mut receiver) = socket.split();

    // Create channel for outgoing messages
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

    gateway.register_connection(connection_id, tx);
    metrics::set_websocket_connections(gateway.connection_count());
    tracing::info!(connection_id = %connection_id, "User connected");

    // Spawn task to forward messages from channel to WebSocket
    let sender_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(t) => t,
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientEvent>(&text) {
                Ok(event) => {
                    let session_id = event.session_id().clone();
                    let delivered = handle_event(&gateway, connection_id, event);
                    tracing::trace!(
                        connection_id = %connection_id,
                        session_id = %session_id,
                        delivered,
                        "Event relayed"
                    );
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %connection_id,
                        error = %e,
                        "Dropping malformed message"
                    );
                }
            },
            Ok(Message::Close(_)) => break,
            // Ping/pong is answered by axum; binary frames carry no events
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    // Cleanup
    gateway.unregister_connection(connection_id);
    metrics::set_websocket_connections(gateway.connection_count());
    sender_task.abort();

    tracing::info!(connection_id = %connection_id, "User disconnected");
}

/// Apply one client event. Returns how many connections it was relayed to.
pub fn handle_event(gateway: &Gateway, connection_id: ConnectionId, event: ClientEvent) -> usize {
    let (session_id, outbound) = match event {
        ClientEvent::JoinSession(join) => {
            let participant = Participant::new(
                connection_id,
                join.session_id.clone(),
                join.user_type,
                join.user_name,
            );
            let outbound = ServerEvent::user_joined(&participant);

            tracing::info!(
                connection_id = %connection_id,
                session_id = %join.session_id,
                user_name = %participant.display_name(),
                user_type = ?participant.user_type,
                "Participant joined session"
            );

            if !gateway.join(participant) {
                return 0;
            }
            (join.session_id, outbound)
        }
        ClientEvent::EditorChange(change) => {
            tracing::debug!(session_id = %change.session_id, "Editor update for session");
            (change.session_id, ServerEvent::editor_update(change.code))
        }
        ClientEvent::SendQuiz(quiz) => {
            tracing::debug!(session_id = %quiz.session_id, "Quiz sent to session");
            (quiz.session_id, ServerEvent::quiz_received(quiz.quiz_text))
        }
    };

    let delivered = gateway.broadcast_from(connection_id, &session_id, &outbound);
    metrics::record_relay_event(outbound.event_name());
    delivered
}
