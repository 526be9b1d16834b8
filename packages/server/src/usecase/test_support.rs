//! Test doubles shared by the use case tests.

use std::{collections::BTreeSet, sync::Arc};

use async_trait::async_trait;
use hiroba_shared::time::{Clock, FixedClock};
use tokio::sync::Mutex;

use crate::{
    domain::{
        ConnectionId, ConnectionRepository, MessageHistoryRepository, MessagePushError,
        MessagePusher, Notification, PusherChannel,
    },
    infrastructure::repository::{InMemoryConnectionRepository, InMemoryMessageHistoryRepository},
};

/// 送信された通知を宛先ごとに記録する MessagePusher
#[derive(Default)]
pub struct RecordingPusher {
    registered: Mutex<BTreeSet<ConnectionId>>,
    deliveries: Mutex<Vec<(ConnectionId, Notification)>>,
}

impl RecordingPusher {
    /// 送信チャンネルなしでクライアントを登録済みにする
    pub async fn register(&self, id: &str) {
        self.registered.lock().await.insert(ConnectionId::from(id));
    }

    /// `id` に届いた通知（到着順）
    pub async fn received_by(&self, id: &str) -> Vec<Notification> {
        self.deliveries
            .lock()
            .await
            .iter()
            .filter(|(target, _)| target.as_str() == id)
            .map(|(_, notification)| notification.clone())
            .collect()
    }

    /// 記録された送信の総数
    pub async fn total(&self) -> usize {
        self.deliveries.lock().await.len()
    }

    pub async fn clear(&self) {
        self.deliveries.lock().await.clear();
    }

    async fn record(&self, target: ConnectionId, notification: &Notification) {
        self.deliveries
            .lock()
            .await
            .push((target, notification.clone()));
    }
}

#[async_trait]
impl MessagePusher for RecordingPusher {
    async fn register_client(&self, connection_id: ConnectionId, _sender: PusherChannel) {
        self.registered.lock().await.insert(connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        self.registered.lock().await.remove(connection_id);
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        self.record(connection_id.clone(), notification).await;
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        for target in targets {
            self.record(target, notification).await;
        }
        Ok(())
    }

    async fn broadcast_all(&self, notification: &Notification) -> Result<(), MessagePushError> {
        let registered: Vec<ConnectionId> =
            self.registered.lock().await.iter().cloned().collect();
        for target in registered {
            self.record(target, notification).await;
        }
        Ok(())
    }
}

/// テスト用の依存一式
pub struct Fixture {
    pub connections: Arc<InMemoryConnectionRepository>,
    pub history: Arc<InMemoryMessageHistoryRepository>,
    pub pusher: Arc<RecordingPusher>,
    pub clock: Arc<dyn Clock>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(InMemoryConnectionRepository::default()),
            history: Arc::new(InMemoryMessageHistoryRepository::default()),
            pusher: Arc::new(RecordingPusher::default()),
            clock: Arc::new(FixedClock::new(0)),
        }
    }

    pub fn connections(&self) -> Arc<dyn ConnectionRepository> {
        self.connections.clone()
    }

    pub fn history(&self) -> Arc<dyn MessageHistoryRepository> {
        self.history.clone()
    }

    pub fn pusher(&self) -> Arc<dyn MessagePusher> {
        self.pusher.clone()
    }

    /// Room に入室済みの接続を直接登録する（通知は発生しない）
    pub async fn seat(&self, id: &str, name: &str, room: &str) {
        self.pusher.register(id).await;
        self.connections
            .upsert(id.into(), name.into(), room.into())
            .await;
    }
}

/// 管理者通知の本文を取り出す
pub fn admin_text(notification: &Notification) -> Option<&str> {
    match notification {
        Notification::Message(message) if message.sender_name.is_admin() => {
            Some(message.text.as_str())
        }
        _ => None,
    }
}
