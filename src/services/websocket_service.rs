use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    dto::ws::{ClientMessage, ServerMessage},
    error::ServiceError,
    services::lobby_service,
    state::{PlayerId, SharedState},
};

/// The connection's writer task is gone.
#[derive(Debug, Error)]
#[error("connection closed")]
pub struct ConnectionClosed;

/// Handle the full lifecycle for an individual player WebSocket connection.
pub async fn handle_socket(state: SharedState, socket: WebSocket) {
    let (mut sender, mut receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

    // Dedicated writer task keeps outbound messages flowing even while we await inbound frames.
    let writer_task = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    let Ok(player_id) = open_session(&state, &outbound_tx) else {
        finalize(writer_task, outbound_tx).await;
        return;
    };

    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Text(text)) => {
                if handle_text(&state, player_id, &outbound_tx, text.as_str()).is_err() {
                    info!(%player_id, "connection closed while replying, terminating");
                    break;
                }
            }
            Ok(Message::Ping(payload)) => {
                let _ = outbound_tx.send(Message::Pong(payload));
            }
            Ok(Message::Close(frame)) => {
                info!(%player_id, "player closed connection");
                let _ = outbound_tx.send(Message::Close(frame));
                break;
            }
            Ok(Message::Binary(_)) => {}
            Ok(Message::Pong(_)) => {}
            Err(err) => {
                warn!(%player_id, error = %err, "websocket error");
                break;
            }
        }
    }

    close_session(&state, player_id);
    finalize(writer_task, outbound_tx).await;
}

/// Register the connection and greet it with its player id.
fn open_session(
    state: &SharedState,
    outbound_tx: &mpsc::UnboundedSender<Message>,
) -> Result<PlayerId, ConnectionClosed> {
    let player_id = state.players().connect(outbound_tx.clone());
    info!(%player_id, "player connected");

    if let Err(err) = send_message_to_websocket(outbound_tx, &ServerMessage::Connected { player_id })
    {
        info!(%player_id, "connection closed before greeting, terminating");
        state.players().disconnect(&player_id);
        return Err(err);
    }
    Ok(player_id)
}

/// Parse and dispatch one text frame. Rejected frames are answered with an
/// `error` message and the connection stays open.
fn handle_text(
    state: &SharedState,
    player_id: PlayerId,
    outbound_tx: &mpsc::UnboundedSender<Message>,
    text: &str,
) -> Result<(), ConnectionClosed> {
    debug!(%player_id, payload = %text, "received player message");

    let result = match ClientMessage::from_json_str(text) {
        Ok(message) => dispatch(state, player_id, message),
        Err(err) => Err(ServiceError::InvalidInput(err.to_string())),
    };

    if let Err(err) = result {
        warn!(%player_id, error = %err, "rejected player message");
        let reply = ServerMessage::Error {
            message: err.to_string(),
        };
        send_message_to_websocket(outbound_tx, &reply)?;
    }
    Ok(())
}

/// Leave any game and drop the player from the registry.
fn close_session(state: &SharedState, player_id: PlayerId) {
    lobby_service::disconnect(state, player_id);
    info!(%player_id, "player disconnected");
}

/// Route a parsed client message to the lobby.
fn dispatch(
    state: &SharedState,
    player_id: PlayerId,
    message: ClientMessage,
) -> Result<(), ServiceError> {
    match message {
        ClientMessage::CreateGame(payload) => {
            lobby_service::create_game(state, player_id, payload).map(|_| ())
        }
        ClientMessage::JoinGame(payload) => {
            lobby_service::join_game(state, player_id, payload).map(|_| ())
        }
        ClientMessage::LeaveGame => lobby_service::leave_game(state, player_id),
        ClientMessage::Unknown => Err(ServiceError::InvalidInput(
            "unknown message type".into(),
        )),
    }
}

/// Serialize a payload and push it onto the provided WebSocket sender.
///
/// Serialization failures are logged and swallowed since retrying cannot help.
/// Returns [`ConnectionClosed`] if the writer channel is closed.
pub fn send_message_to_websocket<T>(
    tx: &mpsc::UnboundedSender<Message>,
    value: &T,
) -> Result<(), ConnectionClosed>
where
    T: ?Sized + serde::Serialize + std::fmt::Debug,
{
    let payload = match serde_json::to_string(value) {
        Ok(p) => p,
        Err(err) => {
            warn!(error = %err, "failed to serialize message `{value:?}`");
            return Ok(());
        }
    };

    tx.send(Message::Text(payload.into()))
        .map_err(|_| ConnectionClosed)
}

/// Ensure the writer task winds down before we return from the socket handler.
async fn finalize(writer_task: JoinHandle<()>, outbound_tx: mpsc::UnboundedSender<Message>) {
    drop(outbound_tx);
    let _ = writer_task.await;
}
