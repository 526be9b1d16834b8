//! MessagePusher trait 定義
//!
//! ユースケースがクライアントへ通知を送るためのインターフェースです。
//! 送信は fire-and-forget で、到達確認は行いません。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, Notification};

/// クライアントごとの送信チャンネル（ワイヤ形式の文字列を流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// クライアントの送信チャンネルを登録解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定のクライアントへ送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// 複数のクライアントへ送信（一部の失敗は許容）
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// 登録済みの全クライアントへ送信（Room 未入室のクライアントを含む）
    async fn broadcast_all(&self, notification: &Notification) -> Result<(), MessagePushError>;
}
