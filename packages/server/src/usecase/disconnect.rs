//! UseCase: 切断処理（Session Coordinator）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - 切断時に旧 Room への退室通知・メンバー一覧、全体への Room 一覧が送られること
//! - Room 未入室の接続の切断では何も通知されないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：入室済みの接続の切断
//! - エッジケース：最後のメンバーの切断（Room 一覧から消える）
//! - エッジケース：Room 未入室・二重の切断（通知なし）

use std::sync::Arc;

use hiroba_shared::time::{Clock, format_clock_time};

use crate::domain::{
    ChatMessage, Connection, ConnectionId, ConnectionRepository, MessagePusher, Notification,
};

use super::{broadcast_all_or_warn, broadcast_or_warn};

/// 切断のユースケース
pub struct DisconnectUseCase {
    /// Connection Registry
    connections: Arc<dyn ConnectionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl DisconnectUseCase {
    /// 新しい DisconnectUseCase を作成
    pub fn new(
        connections: Arc<dyn ConnectionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            connections,
            message_pusher,
            clock,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// * `Some(Connection)` - 削除した接続レコード（Room に入室していた場合）
    /// * `None` - Room 未入室、または既に削除済み
    pub async fn execute(&self, connection_id: ConnectionId) -> Option<Connection> {
        // 1. 削除前にレコードを取得
        let connection = self.connections.find(&connection_id).await;

        // 2. Registry と MessagePusher から削除
        self.connections.remove(&connection_id).await;
        self.message_pusher.unregister_client(&connection_id).await;

        // 3. 入室していた場合だけ通知
        let Some(connection) = connection else {
            tracing::info!("Connection '{}' disconnected without a room", connection_id);
            return None;
        };

        let pusher = self.message_pusher.as_ref();
        let left = Notification::Message(ChatMessage::admin(
            format!("{} has left the room", connection.name),
            format_clock_time(self.clock.now_millis()),
        ));
        let members = self.connections.list_by_room(&connection.room).await;
        let targets: Vec<ConnectionId> = members.iter().map(|member| member.id.clone()).collect();
        broadcast_or_warn(pusher, targets.clone(), &left).await;
        broadcast_or_warn(pusher, targets, &Notification::UserList { users: members }).await;

        let rooms = self.connections.list_active_room_names().await;
        broadcast_all_or_warn(pusher, &Notification::RoomList { rooms }).await;

        tracing::info!(
            "Connection '{}' ({}) left '{}' and disconnected",
            connection_id,
            connection.name,
            connection.room
        );

        Some(connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomName;
    use crate::usecase::test_support::{Fixture, admin_text};

    fn usecase(fixture: &Fixture) -> DisconnectUseCase {
        DisconnectUseCase::new(fixture.connections(), fixture.pusher(), fixture.clock.clone())
    }

    #[tokio::test]
    async fn test_disconnect_notifies_former_room() {
        // テスト項目: 切断すると旧 Room に退室通知とメンバー一覧、全体に Room 一覧が届く
        // given (前提条件):
        let fixture = Fixture::new();
        fixture.seat("a", "alice", "lobby").await;
        fixture.seat("b", "bob", "lobby").await;
        fixture.pusher.register("idle").await;

        // when (操作):
        let removed = usecase(&fixture).execute("a".into()).await;

        // then (期待する結果):
        assert_eq!(removed.map(|c| c.name.into_string()), Some("alice".to_string()));
        assert!(fixture.connections.find(&"a".into()).await.is_none());

        let to_bob = fixture.pusher.received_by("b").await;
        assert_eq!(to_bob.len(), 3);
        assert_eq!(admin_text(&to_bob[0]), Some("alice has left the room"));
        match &to_bob[1] {
            Notification::UserList { users } => {
                assert_eq!(users.len(), 1);
                assert_eq!(users[0].id.as_str(), "b");
            }
            other => panic!("unexpected notification: {:?}", other),
        }
        assert_eq!(
            to_bob[2],
            Notification::RoomList {
                rooms: vec![RoomName::from("lobby")]
            }
        );

        // 切断した本人には何も届かない
        assert!(fixture.pusher.received_by("a").await.is_empty());
        assert_eq!(fixture.pusher.received_by("idle").await.len(), 1);
    }

    #[tokio::test]
    async fn test_disconnect_last_member_empties_room_list() {
        // テスト項目: 最後のメンバーが切断すると Room 一覧が空になる
        // given (前提条件):
        let fixture = Fixture::new();
        fixture.seat("a", "alice", "lobby").await;
        fixture.pusher.register("idle").await;

        // when (操作):
        usecase(&fixture).execute("a".into()).await;

        // then (期待する結果):
        assert_eq!(
            fixture.pusher.received_by("idle").await,
            vec![Notification::RoomList { rooms: vec![] }]
        );
    }

    #[tokio::test]
    async fn test_disconnect_without_room_is_silent() {
        // テスト項目: Room 未入室の接続の切断では何も通知されない
        // given (前提条件):
        let fixture = Fixture::new();
        fixture.seat("b", "bob", "lobby").await;
        fixture.pusher.register("a").await;

        // when (操作):
        let removed = usecase(&fixture).execute("a".into()).await;

        // then (期待する結果):
        assert!(removed.is_none());
        assert_eq!(fixture.pusher.total().await, 0);
    }

    #[tokio::test]
    async fn test_double_disconnect_is_silent() {
        // テスト項目: 同じ接続を二度切断しても二度目は何も通知されない
        // given (前提条件):
        let fixture = Fixture::new();
        fixture.seat("a", "alice", "lobby").await;
        fixture.seat("b", "bob", "lobby").await;
        let usecase = usecase(&fixture);
        usecase.execute("a".into()).await;
        fixture.pusher.clear().await;

        // when (操作):
        let removed = usecase.execute("a".into()).await;

        // then (期待する結果):
        assert!(removed.is_none());
        assert_eq!(fixture.pusher.total().await, 0);
    }
}
