//! UseCase: 入力中インジケーターの中継（Message Router）

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRepository, DisplayName, MessagePusher, Notification};

use super::{Delivery, broadcast_or_warn};

/// 入力中インジケーター中継のユースケース
pub struct RelayActivityUseCase {
    connections: Arc<dyn ConnectionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayActivityUseCase {
    pub fn new(
        connections: Arc<dyn ConnectionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            connections,
            message_pusher,
        }
    }

    /// 送信者以外の Room メンバーへ中継する。送信者が Room 未入室なら破棄
    pub async fn execute(&self, connection_id: ConnectionId, name: DisplayName) -> Delivery {
        let Some(sender) = self.connections.find(&connection_id).await else {
            return Delivery::Dropped;
        };

        let targets: Vec<ConnectionId> = self
            .connections
            .list_by_room(&sender.room)
            .await
            .into_iter()
            .map(|member| member.id)
            .filter(|id| id != &connection_id)
            .collect();
        let recipients = targets.len();
        broadcast_or_warn(
            self.message_pusher.as_ref(),
            targets,
            &Notification::Activity { name },
        )
        .await;

        Delivery::Delivered { recipients }
    }
}
