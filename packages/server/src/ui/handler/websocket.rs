//! WebSocket chat gateway.
//!
//! One connection goes through `Accept → Authenticate → Join → ReceiveLoop → Leave/Close`.
//! Authentication happens on the HTTP handshake, so a rejected credential never
//! reaches the upgrade and never touches the registry.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, Stream, StreamExt},
};
use tokio::task::JoinHandle;

use crate::{
    domain::{PusherReceiver, RoomId, Session, pusher_channel},
    ui::state::AppState,
    usecase::AuthenticateError,
};

/// Extract the token of an `Authorization: Bearer <token>` header.
pub fn bearer_credential(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> RoomId (Domain Model)
    let room_id = match RoomId::try_from(room_id) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Rejecting connection with invalid room id: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    let session = match state
        .authenticate_usecase
        .execute(bearer_credential(&headers), room_id)
        .await
    {
        Ok(session) => session,
        Err(AuthenticateError::MissingCredential) => {
            tracing::warn!("Rejecting connection without bearer credential");
            return Err(StatusCode::UNAUTHORIZED);
        }
        Err(AuthenticateError::Unauthorized) => {
            tracing::warn!("Rejecting connection with invalid credential");
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    tracing::info!(
        "Session {} authenticated as '{}' for room '{}'",
        session.id(),
        session.identity(),
        session.room_id()
    );

    Ok(ws
        .max_message_size(state.max_message_size)
        .on_upgrade(move |socket| handle_socket(socket, state, session)))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This is the only writer of the session's transport: broadcasts from other
/// sessions arrive here through the channel registered in the room registry.
fn pusher_loop(
    mut rx: PusherReceiver,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(msg.into())).await {
                tracing::debug!("WebSocket send failed, stopping pusher: {}", e);
                break;
            }
        }
    })
}

/// Reads inbound frames and relays each text frame to the room.
///
/// Returns once the peer closes, the read fails, or `pusher` finishes. `pusher` is
/// only raced against the next read, so a message already taken off the socket is
/// always broadcast and persisted before the loop returns.
async fn receive_loop<S>(
    mut receiver: S,
    state: &AppState,
    session: &Session,
    pusher: &mut JoinHandle<()>,
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    loop {
        let msg = tokio::select! {
            msg = receiver.next() => msg,
            _ = &mut *pusher => {
                tracing::debug!("Pusher of session {} finished", session.id());
                break;
            }
        };

        let msg = match msg {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                // Transport errors end the session the same way a close does
                tracing::debug!("WebSocket read failed for session {}: {}", session.id(), e);
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => {
                tracing::debug!("Received text from '{}': {}", session.identity(), text);
                match state
                    .send_message_usecase
                    .execute(session, text.to_string())
                    .await
                {
                    Ok(outcome) => {
                        if !outcome.persisted {
                            tracing::warn!(
                                "Message from '{}' relayed but not persisted",
                                session.identity()
                            );
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to send message: {}", e);
                        break;
                    }
                }
            }
            Message::Binary(_) => {
                tracing::debug!("Ignoring binary frame from '{}'", session.identity());
            }
            Message::Ping(_) | Message::Pong(_) => {
                // Ping/pong is handled automatically by the WebSocket protocol
            }
            Message::Close(_) => {
                tracing::info!("Session {} requested close", session.id());
                break;
            }
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, mut session: Session) {
    let (mut sender, receiver) = socket.split();

    // Create a channel for this session to receive broadcasts
    let (tx, rx) = pusher_channel();

    if let Err(e) = state.join_room_usecase.execute(&mut session, tx).await {
        tracing::warn!("Session {} could not join: {}", session.id(), e);
        let frame = CloseFrame {
            code: close_code::POLICY,
            reason: e.to_string().into(),
        };
        if let Err(e) = sender.send(Message::Close(Some(frame))).await {
            tracing::debug!("Failed to send close frame: {}", e);
        }
        state.leave_room_usecase.execute(&mut session).await;
        return;
    }

    let mut send_task = pusher_loop(rx, sender);
    receive_loop(receiver, &state, &session, &mut send_task).await;
    send_task.abort();

    let outcome = state.leave_room_usecase.execute(&mut session).await;
    tracing::info!(
        "Session {} ('{}') closed (registry entry removed: {}, notice delivered to {})",
        session.id(),
        session.identity(),
        outcome.removed,
        outcome.notice.map(|n| n.delivered).unwrap_or_default()
    );
}
