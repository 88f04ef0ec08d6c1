use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::SinkExt;
use futures::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::rest::auth::Authenticated;
use crate::state::AppState;

/// Streams the caller's own notifications as they are created.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Authenticated(actor): Authenticated,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, actor.id()))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, recipient_id: Uuid) {
    let (mut sender, mut receiver) = socket.split();
    let mut notifications = Box::pin(BroadcastStream::new(state.inbox.subscribe()).filter_map(
        move |result| async move {
            match result {
                Ok(notification) if notification.recipient_id == recipient_id => {
                    Some(notification)
                }
                Ok(_) => None,
                Err(err) => {
                    warn!(recipient_id = %recipient_id, error = %err, "notification stream lagged");
                    None
                }
            }
        },
    ));

    info!(recipient_id = %recipient_id, "websocket client connected");

    let send_task = tokio::spawn(async move {
        while let Some(notification) = notifications.next().await {
            let json = match serde_json::to_string(&notification) {
                Ok(json) => json,
                Err(err) => {
                    warn!(error = %err, "failed to serialize notification for ws");
                    continue;
                }
            };

            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let recv_task = tokio::spawn(async move {
        while let Some(Ok(_msg)) = receiver.next().await {}
    });

    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }

    info!(recipient_id = %recipient_id, "websocket client disconnected");
}
