//! WebSocket frame DTOs.
//!
//! Every frame is a JSON object tagged with `type`.

use serde::{Deserialize, Serialize};

/// Frames sent by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundMessage {
    EnterRoom {
        name: String,
        room: String,
    },
    Message {
        name: String,
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    PrivateMessage {
        target_user_id: String,
        text: String,
    },
    Activity {
        name: String,
    },
}

/// Frames sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundMessage {
    Session {
        id: String,
    },
    Message {
        name: String,
        text: String,
        time: String,
    },
    #[serde(rename_all = "camelCase")]
    PrivateMessage {
        sender_name: String,
        text: String,
    },
    Activity {
        name: String,
    },
    UserList {
        users: Vec<UserInfo>,
    },
    RoomList {
        rooms: Vec<String>,
    },
}

/// A room member as shown in `userList`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub room: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_private_message_uses_camel_case_fields() {
        // テスト項目: privateMessage の targetUserId がパースされる
        // given (前提条件):
        let json = r#"{"type":"privateMessage","targetUserId":"abc","text":"psst"}"#;

        // when (操作):
        let parsed: InboundMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            parsed,
            InboundMessage::PrivateMessage {
                target_user_id: "abc".to_string(),
                text: "psst".to_string(),
            }
        );
    }

    #[test]
    fn test_inbound_enter_room_tag() {
        // テスト項目: enterRoom タグがパースされる
        // given (前提条件):
        let json = r#"{"type":"enterRoom","name":"A","room":"lobby"}"#;

        // when (操作):
        let parsed: InboundMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert!(matches!(parsed, InboundMessage::EnterRoom { ref room, .. } if room == "lobby"));
    }

    #[test]
    fn test_inbound_unknown_type_is_rejected() {
        // テスト項目: 未知の type や必須フィールド欠落はエラーになる
        // given (前提条件):
        let unknown = r#"{"type":"shout","text":"hi"}"#;
        let missing = r#"{"type":"message","text":"hi"}"#;

        // when (操作) / then (期待する結果):
        assert!(serde_json::from_str::<InboundMessage>(unknown).is_err());
        assert!(serde_json::from_str::<InboundMessage>(missing).is_err());
        assert!(serde_json::from_str::<InboundMessage>("plain text").is_err());
    }

    #[test]
    fn test_outbound_user_list_shape() {
        // テスト項目: userList が {type, users:[{id,name,room}]} の形で出力される
        // given (前提条件):
        let msg = OutboundMessage::UserList {
            users: vec![UserInfo {
                id: "1".to_string(),
                name: "A".to_string(),
                room: "lobby".to_string(),
            }],
        };

        // when (操作):
        let value = serde_json::to_value(&msg).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            serde_json::json!({
                "type": "userList",
                "users": [{"id": "1", "name": "A", "room": "lobby"}]
            })
        );
    }

    #[test]
    fn test_outbound_private_message_shape() {
        // テスト項目: privateMessage が senderName フィールドで出力される
        // given (前提条件):
        let msg = OutboundMessage::PrivateMessage {
            sender_name: "A".to_string(),
            text: "psst".to_string(),
        };

        // when (操作):
        let value = serde_json::to_value(&msg).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            serde_json::json!({"type": "privateMessage", "senderName": "A", "text": "psst"})
        );
    }
}
