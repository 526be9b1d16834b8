//! UseCase: 入室処理（Session Coordinator）
//!
//! ## 状態遷移
//!
//! `Connected-NoRoom` → `InRoom(room)` → `InRoom(room')` …
//!
//! 同じ Room への再入室も拒否せず、退室・入室の通知をもう一度流します。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - 初回入室で履歴・ウェルカム・入室通知・メンバー一覧・Room 一覧が正しい宛先に届くこと
//! - Room 移動で旧 Room に退室通知と更新後のメンバー一覧が届くこと
//! - 履歴は入室者本人にだけ、保存順のまま届くこと

use std::sync::Arc;

use hiroba_shared::time::{Clock, format_clock_time};

use crate::domain::{
    ChatMessage, Connection, ConnectionId, ConnectionRepository, DisplayName,
    MessageHistoryRepository, MessagePusher, Notification, RoomName,
};

use super::{broadcast_all_or_warn, broadcast_or_warn, push_or_warn};

/// 入室のユースケース
pub struct EnterRoomUseCase {
    /// Connection Registry
    connections: Arc<dyn ConnectionRepository>,
    /// History Buffer
    history: Arc<dyn MessageHistoryRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl EnterRoomUseCase {
    /// 新しい EnterRoomUseCase を作成
    pub fn new(
        connections: Arc<dyn ConnectionRepository>,
        history: Arc<dyn MessageHistoryRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            connections,
            history,
            message_pusher,
            clock,
        }
    }

    /// 入室を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 入室する接続の ID
    /// * `name` - 表示名（空文字列も有効）
    /// * `room` - 入室先の Room 名（空文字列も有効）
    ///
    /// # Returns
    ///
    /// 更新後の接続レコード
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        name: DisplayName,
        room: RoomName,
    ) -> Connection {
        let pusher = self.message_pusher.as_ref();

        // 1. 直前の Room を取得
        let previous_room = self
            .connections
            .find(&connection_id)
            .await
            .map(|connection| connection.room);

        // 2. 直前の Room の残りのメンバーに退室を通知
        if let Some(previous_room) = &previous_room {
            let left = self.admin_notice(format!("{} has left the room", name));
            let remaining = self.member_ids_except(previous_room, &connection_id).await;
            broadcast_or_warn(pusher, remaining, &left).await;
        }

        // 3. Registry を更新
        let connection = self
            .connections
            .upsert(connection_id.clone(), name.clone(), room.clone())
            .await;

        if let Some(previous_room) = &previous_room {
            // 本人には新しい Room の一覧が後で届くので除外する
            let members = self.connections.list_by_room(previous_room).await;
            let targets = self.member_ids_except(previous_room, &connection_id).await;
            broadcast_or_warn(pusher, targets, &Notification::UserList { users: members }).await;
        }

        // 4. 履歴を本人にだけ、保存順のまま送る
        for message in self.history.history_of(&room).await {
            push_or_warn(pusher, &connection_id, &Notification::Message(message)).await;
        }

        // 5. ウェルカム（本人）、入室通知（他のメンバー）、メンバー一覧（Room 全員）
        let welcome = self.admin_notice(format!("You have joined the {} chat room", room));
        push_or_warn(pusher, &connection_id, &welcome).await;

        let joined = self.admin_notice(format!("{} has joined the room", name));
        let others = self.member_ids_except(&room, &connection_id).await;
        broadcast_or_warn(pusher, others, &joined).await;

        let members = self.connections.list_by_room(&room).await;
        let targets = members.iter().map(|member| member.id.clone()).collect();
        broadcast_or_warn(pusher, targets, &Notification::UserList { users: members }).await;

        // 6. Room 一覧を全クライアントへ
        let rooms = self.connections.list_active_room_names().await;
        broadcast_all_or_warn(pusher, &Notification::RoomList { rooms }).await;

        match previous_room {
            Some(previous_room) => tracing::info!(
                "Connection '{}' moved from '{}' to '{}' as '{}'",
                connection_id,
                previous_room,
                room,
                name
            ),
            None => tracing::info!(
                "Connection '{}' entered '{}' as '{}'",
                connection_id,
                room,
                name
            ),
        }

        connection
    }

    fn admin_notice(&self, text: String) -> Notification {
        Notification::Message(ChatMessage::admin(
            text,
            format_clock_time(self.clock.now_millis()),
        ))
    }

    async fn member_ids_except(&self, room: &RoomName, exclude: &ConnectionId) -> Vec<ConnectionId> {
        self.connections
            .list_by_room(room)
            .await
            .into_iter()
            .map(|member| member.id)
            .filter(|id| id != exclude)
            .collect()
    }
}
