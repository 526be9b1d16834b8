//! UseCase: 接続処理
//!
//! トランスポート接続直後、Room 未入室の状態でクライアントを登録し、
//! 払い出した接続 ID とウェルカム通知を本人にだけ送ります。

use std::sync::Arc;

use hiroba_shared::time::{Clock, format_clock_time};

use crate::domain::{ChatMessage, ConnectionId, MessagePusher, Notification, PusherChannel};

use super::push_or_warn;

/// 接続時に本人へ送るウェルカム通知の本文
pub const WELCOME_TEXT: &str = "Welcome to Chat App!";

/// 接続のユースケース
pub struct ConnectUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectUseCase {
    /// 新しい ConnectUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            message_pusher,
            clock,
        }
    }

    /// 接続を実行
    ///
    /// Connection Registry には登録しません。Registry に載るのは `enterRoom` 以降です。
    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;

        let session = Notification::Session {
            connection_id: connection_id.clone(),
        };
        push_or_warn(self.message_pusher.as_ref(), &connection_id, &session).await;

        let welcome = Notification::Message(ChatMessage::admin(
            WELCOME_TEXT,
            format_clock_time(self.clock.now_millis()),
        ));
        push_or_warn(self.message_pusher.as_ref(), &connection_id, &welcome).await;

        tracing::info!("Connection '{}' registered", connection_id);
    }
}
