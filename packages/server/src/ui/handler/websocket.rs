//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::TokenClaims, infrastructure::dto::websocket::ClientMessage, ui::state::AppState,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub token: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let claims = match state.verify_token_usecase.execute(query.token.as_deref()) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!("Rejecting WebSocket upgrade: {}", e);
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    tracing::info!(
        "Upgrading connection for '{}' in room '{}'",
        claims.name,
        claims.room_id
    );
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, claims)))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket
/// sender.
///
/// This is the only place that writes to the socket, so frames leave in the
/// order they were enqueued.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, claims: TokenClaims) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive room events
    let (tx, rx) = mpsc::unbounded_channel();
    let mut session = state.session_manager.open(claims, tx).await;
    let connection_id = session.connection_id();

    let mut send_task = pusher_loop(rx, sender);

    // Only `receiver.next()` races the writer; a command that has started
    // always runs to completion before the session is closed.
    loop {
        tokio::select! {
            frame = receiver.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    tracing::debug!("Received from '{}': {}", connection_id, text.as_str());
                    match serde_json::from_str::<ClientMessage>(text.as_str()) {
                        Ok(message) => {
                            state
                                .session_manager
                                .handle(&mut session, message.into())
                                .await;
                        }
                        Err(e) => {
                            tracing::warn!(
                                "Ignoring malformed frame from '{}': {}",
                                connection_id,
                                e
                            );
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Connection '{}' closed by client", connection_id);
                    break;
                }
                Some(Ok(_)) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Some(Err(e)) => {
                    tracing::error!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            },
            _ = &mut send_task => {
                tracing::info!("Writer for '{}' stopped", connection_id);
                break;
            }
        }
    }
    send_task.abort();

    state.session_manager.close(&mut session).await;
    tracing::info!("Connection '{}' cleaned up", connection_id);
}
