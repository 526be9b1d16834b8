//! UseCase: アクティブな Room 一覧の取得（HTTP API 用の読み取り専用クエリ）

use std::sync::Arc;

use crate::domain::{ChatMessage, Connection, ConnectionRepository, RoomName};

/// ある時点の Room の様子
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub name: RoomName,
    pub users: Vec<Connection>,
    /// 一覧取得では空
    pub history: Vec<ChatMessage>,
}

/// Room 一覧取得のユースケース
pub struct GetRoomsUseCase {
    connections: Arc<dyn ConnectionRepository>,
}

impl GetRoomsUseCase {
    pub fn new(connections: Arc<dyn ConnectionRepository>) -> Self {
        Self { connections }
    }

    /// アクティブな Room とそのメンバーを返す
    pub async fn execute(&self) -> Vec<RoomSnapshot> {
        let mut snapshots = Vec::new();
        for name in self.connections.list_active_room_names().await {
            let users = self.connections.list_by_room(&name).await;
            snapshots.push(RoomSnapshot {
                name,
                users,
                history: Vec::new(),
            });
        }
        snapshots
    }
}
