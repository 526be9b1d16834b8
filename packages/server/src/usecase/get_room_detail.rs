//! UseCase: Room 詳細の取得（HTTP API 用の読み取り専用クエリ）

use std::sync::Arc;

use crate::domain::{ConnectionRepository, MessageHistoryRepository, RoomName};

use super::{GetRoomDetailError, RoomSnapshot};

/// Room 詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    connections: Arc<dyn ConnectionRepository>,
    history: Arc<dyn MessageHistoryRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(
        connections: Arc<dyn ConnectionRepository>,
        history: Arc<dyn MessageHistoryRepository>,
    ) -> Self {
        Self {
            connections,
            history,
        }
    }

    /// メンバーと履歴を返す
    ///
    /// 空になった Room でも履歴が残っていれば見つかったものとして扱う。
    pub async fn execute(&self, room: RoomName) -> Result<RoomSnapshot, GetRoomDetailError> {
        let users = self.connections.list_by_room(&room).await;
        let history = self.history.history_of(&room).await;
        if users.is_empty() && history.is_empty() {
            return Err(GetRoomDetailError::RoomNotFound(room.into_string()));
        }
        Ok(RoomSnapshot {
            name: room,
            users,
            history,
        })
    }
}
