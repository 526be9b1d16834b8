//! InMemory Connection Repository 実装
//!
//! ドメイン層が定義する ConnectionRepository trait の具体的な実装。
//! ドメインモデル `ConnectionRegistry` をそのままストレージとして使用します。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Connection, ConnectionId, ConnectionRegistry, ConnectionRepository, DisplayName, RoomName,
};

/// インメモリ Connection Repository 実装
pub struct InMemoryConnectionRepository {
    registry: Arc<Mutex<ConnectionRegistry>>,
}

impl InMemoryConnectionRepository {
    /// 新しい InMemoryConnectionRepository を作成
    pub fn new(registry: Arc<Mutex<ConnectionRegistry>>) -> Self {
        Self { registry }
    }
}

impl Default for InMemoryConnectionRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(ConnectionRegistry::new())))
    }
}

#[async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn upsert(&self, id: ConnectionId, name: DisplayName, room: RoomName) -> Connection {
        let mut registry = self.registry.lock().await;
        registry.upsert(id, name, room)
    }

    async fn remove(&self, id: &ConnectionId) {
        let mut registry = self.registry.lock().await;
        if registry.remove(id).is_some() {
            tracing::debug!("Connection '{}' removed from registry", id);
        }
    }

    async fn find(&self, id: &ConnectionId) -> Option<Connection> {
        let registry = self.registry.lock().await;
        registry.find(id).cloned()
    }

    async fn list_by_room(&self, room: &RoomName) -> Vec<Connection> {
        let registry = self.registry.lock().await;
        registry.list_by_room(room)
    }

    async fn list_active_room_names(&self) -> Vec<RoomName> {
        let registry = self.registry.lock().await;
        registry.list_active_room_names()
    }
}
