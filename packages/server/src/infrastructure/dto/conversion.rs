//! Conversion logic between DTOs and domain types.

use crate::domain::{ChatEvent, ChatMessage, Connection, ConnectionId, Notification};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// DTO → Domain
// ========================================

impl dto::InboundMessage {
    /// Attach the transport-assigned connection id and turn the frame into a domain event.
    pub fn into_chat_event(self, id: ConnectionId) -> ChatEvent {
        match self {
            dto::InboundMessage::EnterRoom { name, room } => ChatEvent::EnterRoom {
                id,
                name: name.into(),
                room: room.into(),
            },
            dto::InboundMessage::Message { name, text } => ChatEvent::Message {
                id,
                name: name.into(),
                text: text.into(),
            },
            dto::InboundMessage::PrivateMessage {
                target_user_id,
                text,
            } => ChatEvent::PrivateMessage {
                sender_id: id,
                target_id: target_user_id.into(),
                text: text.into(),
            },
            dto::InboundMessage::Activity { name } => ChatEvent::Activity {
                id,
                name: name.into(),
            },
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<Connection> for dto::UserInfo {
    fn from(model: Connection) -> Self {
        Self {
            id: model.id.into_string(),
            name: model.name.into_string(),
            room: model.room.into_string(),
        }
    }
}

impl From<ChatMessage> for http::HistoryEntryDto {
    fn from(model: ChatMessage) -> Self {
        Self {
            name: model.sender_name.into_string(),
            text: model.text.into_string(),
            time: model.time,
        }
    }
}

impl From<Notification> for dto::OutboundMessage {
    fn from(model: Notification) -> Self {
        match model {
            Notification::Session { connection_id } => Self::Session {
                id: connection_id.into_string(),
            },
            Notification::Message(message) => Self::Message {
                name: message.sender_name.into_string(),
                text: message.text.into_string(),
                time: message.time,
            },
            Notification::PrivateMessage { sender_name, text } => Self::PrivateMessage {
                sender_name: sender_name.into_string(),
                text: text.into_string(),
            },
            Notification::Activity { name } => Self::Activity {
                name: name.into_string(),
            },
            Notification::UserList { users } => Self::UserList {
                users: users.into_iter().map(Into::into).collect(),
            },
            Notification::RoomList { rooms } => Self::RoomList {
                rooms: rooms.into_iter().map(|room| room.into_string()).collect(),
            },
        }
    }
}

/// Serialize a notification into the JSON text frame sent over the socket.
pub fn to_wire(notification: &Notification) -> Result<String, serde_json::Error> {
    serde_json::to_string(&dto::OutboundMessage::from(notification.clone()))
}
