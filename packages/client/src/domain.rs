//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use hiroba_server::infrastructure::dto::websocket::{InboundMessage, OutboundMessage, UserInfo};

use crate::error::ClientError;

/// 入力 1 行を解釈した結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/join <name> <room>`
    Join { name: String, room: String },
    /// `/pm <user-id> <text>`
    PrivateMessage { target_id: String, text: String },
    /// `/typing`（入力中であることを Room に知らせる）
    Typing,
    /// `/users`
    ShowUsers,
    /// `/rooms`
    ShowRooms,
    /// `/quit`
    Quit,
    /// スラッシュで始まらない行
    Say(String),
}

/// Parse one input line into a command.
///
/// # Errors
///
/// Returns `ClientError::InvalidCommand` for unknown slash commands or missing arguments.
pub fn parse_command(line: &str) -> Result<Command, ClientError> {
    let line = line.trim();
    if !line.starts_with('/') {
        return Ok(Command::Say(line.to_string()));
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "/join" => {
            let mut args = rest.split_whitespace();
            match (args.next(), args.next(), args.next()) {
                (Some(name), Some(room), None) => Ok(Command::Join {
                    name: name.to_string(),
                    room: room.to_string(),
                }),
                _ => Err(ClientError::InvalidCommand(
                    "usage: /join <name> <room>".to_string(),
                )),
            }
        }
        "/pm" => match rest.split_once(char::is_whitespace) {
            Some((target_id, text)) if !text.trim().is_empty() => Ok(Command::PrivateMessage {
                target_id: target_id.to_string(),
                text: text.trim().to_string(),
            }),
            _ => Err(ClientError::InvalidCommand(
                "usage: /pm <user-id> <text>".to_string(),
            )),
        },
        "/typing" => Ok(Command::Typing),
        "/users" => Ok(Command::ShowUsers),
        "/rooms" => Ok(Command::ShowRooms),
        "/quit" => Ok(Command::Quit),
        other => Err(ClientError::InvalidCommand(format!(
            "unknown command '{}'",
            other
        ))),
    }
}

/// 最後に入室した名前と Room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub name: String,
    pub room: String,
}

/// Client-side view of the session, kept across reconnects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    /// サーバーが割り当てた接続 ID（接続ごとに変わる）
    pub session_id: Option<String>,
    pub membership: Option<Membership>,
    pub users: Vec<UserInfo>,
    pub rooms: Vec<String>,
}

impl ClientState {
    pub fn new(membership: Option<Membership>) -> Self {
        Self {
            membership,
            ..Self::default()
        }
    }

    /// サーバーからのフレームで状態を更新する
    pub fn apply(&mut self, frame: &OutboundMessage) {
        match frame {
            OutboundMessage::Session { id } => self.session_id = Some(id.clone()),
            OutboundMessage::UserList { users } => self.users = users.clone(),
            OutboundMessage::RoomList { rooms } => self.rooms = rooms.clone(),
            _ => {}
        }
    }

    /// 再接続時に送り直す入室フレーム
    pub fn rejoin_frame(&self) -> Option<InboundMessage> {
        self.membership.as_ref().map(|m| InboundMessage::EnterRoom {
            name: m.name.clone(),
            room: m.room.clone(),
        })
    }

    /// Turn a command into the frames to send, updating local state.
    ///
    /// Before the first join there is no name to speak with, so chat lines and
    /// `/typing` produce nothing.
    pub fn frames_for(&mut self, command: Command) -> Vec<InboundMessage> {
        match command {
            Command::Join { name, room } => {
                self.membership = Some(Membership {
                    name: name.clone(),
                    room: room.clone(),
                });
                vec![InboundMessage::EnterRoom { name, room }]
            }
            Command::PrivateMessage { target_id, text } => vec![InboundMessage::PrivateMessage {
                target_user_id: target_id,
                text,
            }],
            Command::Say(text) => match &self.membership {
                Some(membership) => vec![InboundMessage::Message {
                    name: membership.name.clone(),
                    text,
                }],
                None => Vec::new(),
            },
            Command::Typing => match &self.membership {
                Some(membership) => vec![InboundMessage::Activity {
                    name: membership.name.clone(),
                }],
                None => Vec::new(),
            },
            Command::ShowUsers | Command::ShowRooms | Command::Quit => Vec::new(),
        }
    }
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
///
/// # Returns
///
/// `true` if reconnection should be attempted, `false` otherwise
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // 接続に関するエラー以外は再接続しても解決しない
    if !matches!(error, ClientError::ConnectionError(_)) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    current_attempt < max_attempts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(name: &str, room: &str) -> ClientState {
        ClientState::new(Some(Membership {
            name: name.to_string(),
            room: room.to_string(),
        }))
    }

    #[test]
    fn test_parse_plain_line_as_say() {
        // テスト項目: スラッシュで始まらない行は発言になる
        // given (前提条件):
        let line = "  hello there ";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert_eq!(result, Ok(Command::Say("hello there".to_string())));
    }

    #[test]
    fn test_parse_join() {
        // テスト項目: /join は名前と Room を受け取る
        // given (前提条件):
        let line = "/join alice lobby";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(Command::Join {
                name: "alice".to_string(),
                room: "lobby".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_join_with_missing_room() {
        // テスト項目: /join の引数が足りない場合はエラーになる
        // given (前提条件):
        let line = "/join alice";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::InvalidCommand(_))));
    }

    #[test]
    fn test_parse_private_message_keeps_spaces_in_text() {
        // テスト項目: /pm の本文は空白を含めてそのまま渡される
        // given (前提条件):
        let line = "/pm 1234-abcd see you  later";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(Command::PrivateMessage {
                target_id: "1234-abcd".to_string(),
                text: "see you  later".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_private_message_without_text() {
        // テスト項目: /pm に本文がない場合はエラーになる
        // given (前提条件):
        let line = "/pm 1234-abcd";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::InvalidCommand(_))));
    }

    #[test]
    fn test_parse_simple_commands() {
        // テスト項目: 引数のないコマンドが解釈される
        // given (前提条件):
        let lines = ["/users", "/rooms", "/quit"];

        // when (操作):
        let results: Vec<_> = lines.iter().map(|line| parse_command(line)).collect();

        // then (期待する結果):
        assert_eq!(
            results,
            vec![
                Ok(Command::ShowUsers),
                Ok(Command::ShowRooms),
                Ok(Command::Quit)
            ]
        );
    }

    #[test]
    fn test_parse_unknown_command() {
        // テスト項目: 未知のコマンドはエラーになる
        // given (前提条件):
        let line = "/dance";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ClientError::InvalidCommand(
                "unknown command '/dance'".to_string()
            ))
        );
    }

    #[test]
    fn test_say_sends_only_message() {
        // テスト項目: 入室後の発言は message だけが送られ、入力中通知は伴わない
        // given (前提条件):
        let mut state = joined("alice", "lobby");

        // when (操作):
        let frames = state.frames_for(Command::Say("hi".to_string()));

        // then (期待する結果):
        assert_eq!(
            frames,
            vec![InboundMessage::Message {
                name: "alice".to_string(),
                text: "hi".to_string(),
            }]
        );
    }

    #[test]
    fn test_typing_sends_activity() {
        // テスト項目: /typing で入力中通知が送られる
        // given (前提条件):
        let mut state = joined("alice", "lobby");
        let command = parse_command("/typing").unwrap();

        // when (操作):
        let frames = state.frames_for(command);

        // then (期待する結果):
        assert_eq!(
            frames,
            vec![InboundMessage::Activity {
                name: "alice".to_string()
            }]
        );
    }

    #[test]
    fn test_typing_before_join_sends_nothing() {
        // テスト項目: 入室前の /typing は送信されない
        // given (前提条件):
        let mut state = ClientState::default();

        // when (操作):
        let frames = state.frames_for(Command::Typing);

        // then (期待する結果):
        assert!(frames.is_empty());
    }

    #[test]
    fn test_say_before_join_sends_nothing() {
        // テスト項目: 入室前の発言は送信されない
        // given (前提条件):
        let mut state = ClientState::default();

        // when (操作):
        let frames = state.frames_for(Command::Say("hi".to_string()));

        // then (期待する結果):
        assert!(frames.is_empty());
    }

    #[test]
    fn test_join_updates_membership_for_rejoin() {
        // テスト項目: /join で入室先が記録され、再接続時の入室フレームに使われる
        // given (前提条件):
        let mut state = joined("alice", "lobby");

        // when (操作):
        state.frames_for(Command::Join {
            name: "alice".to_string(),
            room: "games".to_string(),
        });

        // then (期待する結果):
        assert_eq!(
            state.rejoin_frame(),
            Some(InboundMessage::EnterRoom {
                name: "alice".to_string(),
                room: "games".to_string(),
            })
        );
    }

    #[test]
    fn test_apply_tracks_session_users_and_rooms() {
        // テスト項目: session / userList / roomList のフレームで状態が更新される
        // given (前提条件):
        let mut state = ClientState::default();
        let user = UserInfo {
            id: "id-1".to_string(),
            name: "alice".to_string(),
            room: "lobby".to_string(),
        };

        // when (操作):
        state.apply(&OutboundMessage::Session {
            id: "id-1".to_string(),
        });
        state.apply(&OutboundMessage::UserList {
            users: vec![user.clone()],
        });
        state.apply(&OutboundMessage::RoomList {
            rooms: vec!["lobby".to_string()],
        });
        state.apply(&OutboundMessage::Activity {
            name: "bob".to_string(),
        });

        // then (期待する結果):
        assert_eq!(state.session_id.as_deref(), Some("id-1"));
        assert_eq!(state.users, vec![user]);
        assert_eq!(state.rooms, vec!["lobby".to_string()]);
    }

    #[test]
    fn test_should_attempt_reconnect_within_limit() {
        // テスト項目: 再接続回数が上限未満の場合、再接続すべきと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 4, 5);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_attempt_reconnect_at_limit() {
        // テスト項目: 再接続回数が上限に達した場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 5, 5);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_not_reconnect_on_invalid_command() {
        // テスト項目: 接続以外のエラーでは再接続しない
        // given (前提条件):
        let error = ClientError::InvalidCommand("/dance".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 0, 5);

        // then (期待する結果):
        assert!(!result);
    }
}
