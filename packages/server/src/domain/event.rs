//! Inbound events.
//!
//! トランスポート層がパース・検証した後に Dispatcher へ渡す入力イベントです。
//! 接続 ID はトランスポート層が暗黙に付与します。

use super::{ConnectionId, DisplayName, MessageText, PusherChannel, RoomName};

#[derive(Debug)]
pub enum ChatEvent {
    /// トランスポート接続が確立した
    Connected {
        id: ConnectionId,
        channel: PusherChannel,
    },
    /// Room への入室（再入室を含む）
    EnterRoom {
        id: ConnectionId,
        name: DisplayName,
        room: RoomName,
    },
    /// Room へのブロードキャストメッセージ
    Message {
        id: ConnectionId,
        name: DisplayName,
        text: MessageText,
    },
    /// 特定の接続へのプライベートメッセージ
    PrivateMessage {
        sender_id: ConnectionId,
        target_id: ConnectionId,
        text: MessageText,
    },
    /// 入力中インジケーター
    Activity {
        id: ConnectionId,
        name: DisplayName,
    },
    /// トランスポート切断
    Disconnected { id: ConnectionId },
}

impl ChatEvent {
    /// イベントを発生させた接続の ID
    pub fn connection_id(&self) -> &ConnectionId {
        match self {
            ChatEvent::Connected { id, .. }
            | ChatEvent::EnterRoom { id, .. }
            | ChatEvent::Message { id, .. }
            | ChatEvent::Activity { id, .. }
            | ChatEvent::Disconnected { id } => id,
            ChatEvent::PrivateMessage { sender_id, .. } => sender_id,
        }
    }

    /// ログ出力用のイベント名
    pub fn kind(&self) -> &'static str {
        match self {
            ChatEvent::Connected { .. } => "connect",
            ChatEvent::EnterRoom { .. } => "enterRoom",
            ChatEvent::Message { .. } => "message",
            ChatEvent::PrivateMessage { .. } => "privateMessage",
            ChatEvent::Activity { .. } => "activity",
            ChatEvent::Disconnected { .. } => "disconnect",
        }
    }
}
