//! Message formatting utilities for client display.

use hiroba_server::{
    domain::ADMIN_NAME,
    infrastructure::dto::websocket::{OutboundMessage, UserInfo},
};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Render one server frame
    ///
    /// `my_id` は userList で自分に印を付けるために使う。
    pub fn format_frame(frame: &OutboundMessage, my_id: Option<&str>) -> String {
        match frame {
            OutboundMessage::Session { id } => Self::format_session(id),
            OutboundMessage::Message { name, text, time } => {
                Self::format_chat_message(name, text, time)
            }
            OutboundMessage::PrivateMessage { sender_name, text } => {
                Self::format_private_message(sender_name, text)
            }
            OutboundMessage::Activity { name } => Self::format_activity(name),
            OutboundMessage::UserList { users } => Self::format_user_list(users, my_id),
            OutboundMessage::RoomList { rooms } => Self::format_room_list(rooms),
        }
    }

    pub fn format_session(id: &str) -> String {
        format!("\nYour user id is {}\n", id)
    }

    /// Format a chat message
    ///
    /// 管理者からの通知は発言と区別して表示する。
    pub fn format_chat_message(name: &str, text: &str, time: &str) -> String {
        if name == ADMIN_NAME {
            format!("\n[{}] *** {} ***\n", time, text)
        } else {
            format!("\n[{}] @{}: {}\n", time, name, text)
        }
    }

    pub fn format_private_message(sender_name: &str, text: &str) -> String {
        format!("\n(private) @{}: {}\n", sender_name, text)
    }

    pub fn format_activity(name: &str) -> String {
        format!("\n{} is typing...\n", name)
    }

    /// Format the member list of the current room
    ///
    /// # Arguments
    ///
    /// * `users` - Members of the room
    /// * `my_id` - The current connection's id (to mark as "me")
    pub fn format_user_list(users: &[UserInfo], my_id: Option<&str>) -> String {
        let mut output = String::new();
        output.push_str("\n============================================================\n");

        match users.first() {
            Some(first) => {
                output.push_str(&format!("Users in {}:\n", first.room));
                for user in users {
                    let me_suffix = if Some(user.id.as_str()) == my_id {
                        " (me)"
                    } else {
                        ""
                    };
                    output.push_str(&format!("{}{} - {}\n", user.name, me_suffix, user.id));
                }
            }
            None => output.push_str("(No users)\n"),
        }

        output.push_str("============================================================\n");
        output
    }

    pub fn format_room_list(rooms: &[String]) -> String {
        if rooms.is_empty() {
            "\nActive rooms: (none)\n".to_string()
        } else {
            format!("\nActive rooms: {}\n", rooms.join(", "))
        }
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
