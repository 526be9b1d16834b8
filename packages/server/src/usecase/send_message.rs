//! UseCase: Room へのメッセージ送信（Message Router）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - 送信者を含む Room の全員にメッセージが届くこと
//! - History Buffer に追加され、上限を超えたら古いものから破棄されること
//! - Room 未入室の送信者のメッセージは何も起こさずに破棄されること

use std::sync::Arc;

use hiroba_shared::time::{Clock, format_clock_time};

use crate::domain::{
    ChatMessage, ConnectionId, ConnectionRepository, DisplayName, MessageHistoryRepository,
    MessagePusher, MessageText, Notification,
};

use super::{Delivery, broadcast_or_warn};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Connection Registry
    connections: Arc<dyn ConnectionRepository>,
    /// History Buffer
    history: Arc<dyn MessageHistoryRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
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

    /// メッセージ送信を実行
    ///
    /// 表示名はイベントに含まれるものをそのまま使います。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        name: DisplayName,
        text: MessageText,
    ) -> Delivery {
        let Some(sender) = self.connections.find(&connection_id).await else {
            tracing::debug!("Dropped message from roomless connection '{}'", connection_id);
            return Delivery::Dropped;
        };

        let message = ChatMessage::new(name, text, format_clock_time(self.clock.now_millis()));

        let targets: Vec<ConnectionId> = self
            .connections
            .list_by_room(&sender.room)
            .await
            .into_iter()
            .map(|member| member.id)
            .collect();
        let recipients = targets.len();
        broadcast_or_warn(
            self.message_pusher.as_ref(),
            targets,
            &Notification::Message(message.clone()),
        )
        .await;

        self.history.append(&sender.room, message).await;

        tracing::debug!(
            "Message from '{}' delivered to {} members of '{}'",
            connection_id,
            recipients,
            sender.room
        );

        Delivery::Delivered { recipients }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessagePushError, PusherChannel, RoomName};
    use crate::usecase::test_support::Fixture;
    use async_trait::async_trait;

    // 送信が一切起きないことを検証するための MessagePusher モック
    mockall::mock! {
        pub Pusher {}

        #[async_trait]
        impl MessagePusher for Pusher {
            async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);
            async fn unregister_client(&self, connection_id: &ConnectionId);
            async fn push_to(
                &self,
                connection_id: &ConnectionId,
                notification: &Notification,
            ) -> Result<(), MessagePushError>;
            async fn broadcast(
                &self,
                targets: Vec<ConnectionId>,
                notification: &Notification,
            ) -> Result<(), MessagePushError>;
            async fn broadcast_all(&self, notification: &Notification) -> Result<(), MessagePushError>;
        }
    }

    fn usecase(fixture: &Fixture) -> SendMessageUseCase {
        SendMessageUseCase::new(
            fixture.connections(),
            fixture.history(),
            fixture.pusher(),
            fixture.clock.clone(),
        )
    }

    #[tokio::test]
    async fn test_message_reaches_whole_room_including_sender() {
        // テスト項目: 送信者を含む Room の全員に同じメッセージが届く
        // given (前提条件):
        let fixture = Fixture::new();
        fixture.seat("a", "A", "lobby").await;
        fixture.seat("b", "B", "lobby").await;
        fixture.seat("c", "C", "games").await;

        // when (操作):
        let result = usecase(&fixture)
            .execute("b".into(), "B".into(), "hi".into())
            .await;

        // then (期待する結果):
        assert_eq!(result, Delivery::Delivered { recipients: 2 });
        let to_a = fixture.pusher.received_by("a").await;
        let to_b = fixture.pusher.received_by("b").await;
        assert_eq!(to_a.len(), 1);
        assert_eq!(to_a, to_b);
        match &to_a[0] {
            Notification::Message(message) => {
                assert_eq!(message.sender_name.as_str(), "B");
                assert_eq!(message.text.as_str(), "hi");
                assert_eq!(message.time.len(), 8);
            }
            other => panic!("unexpected notification: {:?}", other),
        }
        assert!(fixture.pusher.received_by("c").await.is_empty());
    }

    #[tokio::test]
    async fn test_message_is_recorded_in_history() {
        // テスト項目: 送信したメッセージが Room の履歴に追加される
        // given (前提条件):
        let fixture = Fixture::new();
        fixture.seat("a", "A", "lobby").await;

        // when (操作):
        usecase(&fixture)
            .execute("a".into(), "A".into(), "hello".into())
            .await;

        // then (期待する結果):
        let history = fixture.history.history_of(&RoomName::from("lobby")).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text.as_str(), "hello");
        assert!(fixture.history.history_of(&"games".into()).await.is_empty());
    }

    #[tokio::test]
    async fn test_eleven_messages_keep_latest_ten() {
        // テスト項目: 11 件送信すると履歴には 2〜11 件目だけが残る
        // given (前提条件):
        let fixture = Fixture::new();
        fixture.seat("a", "A", "lobby").await;
        let usecase = usecase(&fixture);

        // when (操作):
        for n in 1..=11 {
            usecase
                .execute("a".into(), "A".into(), MessageText::new(format!("m{}", n)))
                .await;
        }

        // then (期待する結果):
        let texts: Vec<String> = fixture
            .history
            .history_of(&"lobby".into())
            .await
            .into_iter()
            .map(|m| m.text.into_string())
            .collect();
        let expected: Vec<String> = (2..=11).map(|n| format!("m{}", n)).collect();
        assert_eq!(texts, expected);
    }

    #[tokio::test]
    async fn test_message_from_roomless_sender_produces_no_events() {
        // テスト項目: Room 未入室の送信者のメッセージは送信も履歴追加も起こさない
        // given (前提条件):
        let fixture = Fixture::new();
        fixture.seat("b", "B", "lobby").await;
        let mut pusher = MockPusher::new();
        pusher.expect_push_to().never();
        pusher.expect_broadcast().never();
        pusher.expect_broadcast_all().never();
        let usecase = SendMessageUseCase::new(
            fixture.connections(),
            fixture.history(),
            Arc::new(pusher),
            fixture.clock.clone(),
        );

        // when (操作):
        let result = usecase
            .execute("ghost".into(), "G".into(), "hello?".into())
            .await;

        // then (期待する結果):
        assert!(result.is_dropped());
        assert!(fixture.history.history_of(&"lobby".into()).await.is_empty());
    }
}
