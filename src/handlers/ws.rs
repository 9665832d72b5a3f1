use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::{IntoResponse, Response},
    http::StatusCode,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    user_id: Option<Uuid>,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(query): Query<WsQuery>,
) -> Response {
    if state.ws_tx.is_none() {
        return (StatusCode::SERVICE_UNAVAILABLE, "Live updates disabled").into_response();
    }

    ws.on_upgrade(move |socket| handle_socket(socket, state, query.user_id))
}

/// Whether a broadcast message should reach a client subscribed for
/// `user_id`. Messages without an owner reach everyone; a client without a
/// user sees everything.
fn is_for(msg: &str, user_id: Option<Uuid>) -> bool {
    let Some(uid) = user_id else {
        return true;
    };
    match serde_json::from_str::<serde_json::Value>(msg) {
        Ok(parsed) => match parsed.get("user_id").and_then(|v| v.as_str()) {
            Some(owner) => owner == uid.to_string(),
            None => true,
        },
        Err(_) => true,
    }
}

async fn handle_socket(socket: WebSocket, state: AppState, user_id: Option<Uuid>) {
    let (mut sender, mut receiver) = socket.split();

    tracing::debug!(user_id = ?user_id, "WebSocket connection established");

    let Some(mut rx) = state.ws_tx.as_ref().map(|tx| tx.subscribe()) else {
        return;
    };

    // Forward broadcast messages to this WebSocket client
    let mut send_task = tokio::spawn(async move {
        loop {
            let msg = match rx.recv().await {
                Ok(msg) => msg,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(user_id = ?user_id, skipped, "WebSocket client lagging, dropped messages");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };
            if !is_for(&msg, user_id) {
                continue;
            }
            if sender.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    tracing::debug!(user_id = ?user_id, message = %text, "WebSocket message received");
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    tracing::debug!(user_id = ?user_id, "WebSocket connection closed");
}
