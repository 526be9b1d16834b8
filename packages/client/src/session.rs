//! WebSocket client session management.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use hiroba_server::infrastructure::dto::websocket::{InboundMessage, OutboundMessage};
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::error::ClientError;

use super::{
    domain::{ClientState, Command, parse_command},
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

fn encode(frame: &InboundMessage) -> Result<Message, ClientError> {
    serde_json::to_string(frame)
        .map(|json| Message::Text(json.into()))
        .map_err(|e| ClientError::ConnectionError(format!("Failed to serialize frame: {}", e)))
}

/// Run one WebSocket session
///
/// `Ok(())` はユーザーが終了した場合（`/quit`、Ctrl+C、Ctrl+D）。
/// 接続できなかった場合と接続が切れた場合は `ClientError::ConnectionError` を返す。
pub async fn run_client_session(
    url: &str,
    state: &Arc<Mutex<ClientState>>,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");
    println!(
        "\nCommands: /join <name> <room>, /pm <user-id> <text>, /typing, /users, /rooms, /quit\n"
    );

    let (mut write, mut read) = ws_stream.split();

    // 再接続の場合は前回の Room に入り直す
    let rejoin = state.lock().await.rejoin_frame();
    if let Some(frame) = rejoin {
        write
            .send(encode(&frame)?)
            .await
            .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    }

    // Spawn a task to handle incoming messages
    let state_for_read = state.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<OutboundMessage>(&text) {
                        Ok(frame) => {
                            let mut state = state_for_read.lock().await;
                            state.apply(&frame);
                            MessageFormatter::format_frame(&frame, state.session_id.as_deref())
                        }
                        Err(_) => MessageFormatter::format_raw_message(&text),
                    };
                    print!("{}", formatted);
                    redisplay_prompt();
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt();
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    loop {
        tokio::select! {
            _ = &mut read_task => {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    // 入力が閉じた（Ctrl+C / Ctrl+D）
                    read_task.abort();
                    let _ = write.close().await;
                    return Ok(());
                };

                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}", e);
                        redisplay_prompt();
                        continue;
                    }
                };

                match command {
                    Command::Quit => {
                        read_task.abort();
                        let _ = write.close().await;
                        return Ok(());
                    }
                    Command::ShowUsers => {
                        let state = state.lock().await;
                        print!(
                            "{}",
                            MessageFormatter::format_user_list(
                                &state.users,
                                state.session_id.as_deref()
                            )
                        );
                        redisplay_prompt();
                    }
                    Command::ShowRooms => {
                        print!("{}", MessageFormatter::format_room_list(&state.lock().await.rooms));
                        redisplay_prompt();
                    }
                    command => {
                        let frames = {
                            let mut state = state.lock().await;
                            if matches!(command, Command::Say(_) | Command::Typing) && state.membership.is_none() {
                                println!("Join a room first: /join <name> <room>");
                                redisplay_prompt();
                            }
                            state.frames_for(command)
                        };

                        for frame in frames {
                            tracing::debug!("Sending {:?}", frame);
                            if let Err(e) = write.send(encode(&frame)?).await {
                                read_task.abort();
                                return Err(ClientError::ConnectionError(e.to_string()));
                            }
                        }
                    }
                }
            }
        }
    }
}
