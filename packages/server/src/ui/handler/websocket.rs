//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ChatEvent, ConnectionId},
    infrastructure::dto::websocket::InboundMessage,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: every notification addressed to this
/// connection arrives on `rx` (already encoded as JSON) and is written to the socket in order.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (sender, mut receiver) = socket.split();

    // 送信チャンネルを登録し、セッション通知と welcome を送ってもらう
    let (tx, rx) = mpsc::unbounded_channel();
    state.submit(ChatEvent::Connected {
        id: connection_id.clone(),
        channel: tx,
    });
    tracing::info!("Connection '{}' opened", connection_id);

    let connection_id_for_recv = connection_id.clone();
    let state_for_recv = state.clone();

    // Spawn a task to receive frames from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!(
                        "WebSocket error on '{}': {}",
                        connection_id_for_recv,
                        e
                    );
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", connection_id_for_recv, text);

                    // 不正なフレームは捨てて接続は維持する
                    match serde_json::from_str::<InboundMessage>(&text) {
                        Ok(inbound) => {
                            state_for_recv
                                .submit(inbound.into_chat_event(connection_id_for_recv.clone()));
                        }
                        Err(e) => {
                            tracing::warn!(
                                "Ignoring malformed frame from '{}': {}",
                                connection_id_for_recv,
                                e
                            );
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_for_recv);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push notifications to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.submit(ChatEvent::Disconnected {
        id: connection_id.clone(),
    });
    tracing::info!("Connection '{}' closed", connection_id);
}
