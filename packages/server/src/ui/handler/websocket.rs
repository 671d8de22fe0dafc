//! WebSocket connection handlers.
//!
//! Per connection: `Connecting → Open → Closed`.
//!
//! - The upgrade is refused (400) when the `{room}` segment is not a valid room name.
//! - Once open, one task reads frames from the client and one task writes
//!   broadcasts to it. Whichever finishes first ends the session.
//! - Text and binary frames are both parsed as chat messages. Binary frames
//!   must hold UTF-8 text.
//! - A malformed payload ends the session with a Close frame (1007).
//! - A client-initiated close is answered before the socket is dropped.
//! - The connection leaves its room exactly once.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        Path, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::{ConnectionId, MessageError, RoomName, decode_payload},
    ui::state::AppState,
    usecase::{SendMessageError, SendOutcome},
};

/// How long the writer gets to flush a Close frame before it is aborted
const CLOSE_GRACE_PERIOD: Duration = Duration::from_secs(1);

/// Why a session ended
#[derive(Debug)]
enum SessionEnd {
    /// The client sent a Close frame or the stream ended
    ClientClosed,
    /// Reading from the socket failed
    TransportError,
    /// The server terminates the connection with this Close frame
    Rejected(CloseFrame),
    /// Writing to the socket failed
    OutboundClosed,
    /// The reader task panicked or was cancelled
    Aborted,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> RoomName (Domain Model)
    let room = match RoomName::try_from(room) {
        Ok(room) => room,
        Err(e) => {
            tracing::warn!("Rejecting connection: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, room)))
}

/// Spawns a task that forwards broadcasts from `rx` to the client.
///
/// Stops after sending the Close frame received on `close_rx`, when a write
/// fails, or when the channel closes (the connection was unregistered). In the
/// last case the sink is closed, which also flushes a pending Close reply.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut close_rx: oneshot::Receiver<CloseFrame>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                // A rejection is sent before the channel is unregistered
                biased;

                frame = &mut close_rx => {
                    if let Ok(frame) = frame {
                        let _ = sender.send(Message::Close(Some(frame))).await;
                    }
                    break;
                }
                msg = rx.recv() => {
                    let Some(msg) = msg else {
                        let _ = sender.close().await;
                        break;
                    };
                    if sender.send(Message::Text(msg.into())).await.is_err() {
                        break;
                    }
                }
            }
        }
    })
}

/// Reads frames from the client until the session ends.
async fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    room: RoomName,
    connection_id: ConnectionId,
) -> SessionEnd {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                return SessionEnd::TransportError;
            }
        };

        match msg {
            Message::Text(text) => {
                tracing::debug!("Received text from '{}': {}", connection_id, text);
                if let Some(end) = relay(&state, &room, connection_id, text.as_str()).await {
                    return end;
                }
            }
            Message::Binary(bytes) => {
                tracing::debug!(
                    "Received binary frame from '{}' ({} bytes)",
                    connection_id,
                    bytes.len()
                );
                let end = match decode_payload(&bytes) {
                    Ok(text) => relay(&state, &room, connection_id, text).await,
                    Err(e) => Some(reject(&room, connection_id, e)),
                };
                if let Some(end) = end {
                    return end;
                }
            }
            Message::Ping(_) | Message::Pong(_) => {
                // Ping/pong is handled automatically by the WebSocket protocol
            }
            Message::Close(_) => {
                tracing::info!("Connection '{}' requested close", connection_id);
                return SessionEnd::ClientClosed;
            }
        }
    }

    SessionEnd::ClientClosed
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, room: RoomName) {
    // Create a channel for this connection to receive broadcasts
    let (tx, rx) = mpsc::unbounded_channel();

    let connection_id = state.connect_participant_usecase.execute(&room, tx).await;
    tracing::info!("Connection '{}' joined room '{}'", connection_id, room);

    let (sender, receiver) = socket.split();
    let (close_tx, close_rx) = oneshot::channel();

    let mut send_task = pusher_loop(rx, close_rx, sender);
    let mut recv_task = tokio::spawn(receive_loop(
        receiver,
        state.clone(),
        room.clone(),
        connection_id,
    ));

    // If any one of the tasks completes, stop the other
    let end = tokio::select! {
        end = &mut recv_task => end.unwrap_or_else(|e| {
            tracing::error!("Reader task of '{}' failed: {}", connection_id, e);
            SessionEnd::Aborted
        }),
        _ = &mut send_task => {
            recv_task.abort();
            SessionEnd::OutboundClosed
        }
    };

    let reason = end_label(&end);
    let drain_writer = match end {
        SessionEnd::Rejected(frame) => {
            let _ = close_tx.send(frame);
            true
        }
        SessionEnd::ClientClosed => true,
        _ => {
            send_task.abort();
            false
        }
    };

    // Unregistering closes the outbound channel, which lets the writer finish
    let remaining = state
        .disconnect_participant_usecase
        .execute(&room, &connection_id)
        .await;

    if drain_writer
        && tokio::time::timeout(CLOSE_GRACE_PERIOD, &mut send_task)
            .await
            .is_err()
    {
        send_task.abort();
    }

    tracing::info!(
        "Connection '{}' left room '{}' ({}, {} member(s) remaining)",
        connection_id,
        room,
        reason,
        remaining
    );
}

/// Passes one inbound payload to the send use case.
///
/// Returns `Some` when the session must end.
async fn relay(
    state: &AppState,
    room: &RoomName,
    connection_id: ConnectionId,
    text: &str,
) -> Option<SessionEnd> {
    match state.send_message_usecase.execute(room, text).await {
        Ok(SendOutcome::Broadcast { delivered, .. }) => {
            tracing::debug!(
                "Message from '{}' delivered to {} member(s)",
                connection_id,
                delivered.len()
            );
            None
        }
        Ok(SendOutcome::Suppressed) => None,
        Err(SendMessageError::MalformedPayload(e)) => Some(reject(room, connection_id, e)),
        Err(e) => {
            tracing::error!("Failed to relay message from '{}': {}", connection_id, e);
            None
        }
    }
}

fn reject(room: &RoomName, connection_id: ConnectionId, error: MessageError) -> SessionEnd {
    tracing::warn!(
        "Terminating '{}' in room '{}': {}",
        connection_id,
        room,
        error
    );
    SessionEnd::Rejected(CloseFrame {
        code: close_code::INVALID,
        reason: "malformed payload".into(),
    })
}

fn end_label(end: &SessionEnd) -> &'static str {
    match end {
        SessionEnd::ClientClosed => "client closed",
        SessionEnd::TransportError => "transport error",
        SessionEnd::Rejected(_) => "rejected",
        SessionEnd::OutboundClosed => "outbound closed",
        SessionEnd::Aborted => "aborted",
    }
}
