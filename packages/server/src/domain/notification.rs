//! Outbound notifications produced by the use cases.

use super::{ChatMessage, Connection, ConnectionId, DisplayName, MessageText, RoomName};

/// クライアントへ通知する出力イベント
///
/// ワイヤ形式への変換は Infrastructure 層（DTO）が行います。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// 接続直後に払い出された ID を本人に伝える
    Session { connection_id: ConnectionId },
    /// Room メッセージ・管理者通知・履歴の再送
    Message(ChatMessage),
    /// プライベートメッセージ
    PrivateMessage {
        sender_name: DisplayName,
        text: MessageText,
    },
    /// 入力中インジケーター
    Activity { name: DisplayName },
    /// Room のメンバー一覧
    UserList { users: Vec<Connection> },
    /// アクティブな Room の一覧
    RoomList { rooms: Vec<RoomName> },
}
