//! UseCase: プライベートメッセージ送信（Message Router）
//!
//! 宛先の接続にだけ届け、History Buffer には記録しません。

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRepository, MessagePusher, MessageText, Notification};

use super::Delivery;

/// プライベートメッセージ送信のユースケース
pub struct SendPrivateMessageUseCase {
    connections: Arc<dyn ConnectionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl SendPrivateMessageUseCase {
    pub fn new(
        connections: Arc<dyn ConnectionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            connections,
            message_pusher,
        }
    }

    /// 送信者・宛先のどちらかが Room に入室していなければ破棄する
    pub async fn execute(
        &self,
        sender_id: ConnectionId,
        target_id: ConnectionId,
        text: MessageText,
    ) -> Delivery {
        let sender = self.connections.find(&sender_id).await;
        let target = self.connections.find(&target_id).await;
        let (Some(sender), Some(target)) = (sender, target) else {
            tracing::debug!(
                "Dropped private message from '{}' to '{}'",
                sender_id,
                target_id
            );
            return Delivery::Dropped;
        };

        let notification = Notification::PrivateMessage {
            sender_name: sender.name,
            text,
        };
        if let Err(e) = self
            .message_pusher
            .push_to(&target.id, &notification)
            .await
        {
            tracing::warn!("Failed to push private message to '{}': {}", target.id, e);
        }

        Delivery::Delivered { recipients: 1 }
    }
}
