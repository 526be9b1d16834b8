//! InMemory Message History Repository 実装

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageHistory, MessageHistoryRepository, RoomName};

/// インメモリ History Buffer 実装
///
/// プロセスの再起動をまたいだ永続化は行いません。
pub struct InMemoryMessageHistoryRepository {
    history: Arc<Mutex<MessageHistory>>,
}

impl InMemoryMessageHistoryRepository {
    /// 新しい InMemoryMessageHistoryRepository を作成
    pub fn new(history: Arc<Mutex<MessageHistory>>) -> Self {
        Self { history }
    }
}

impl Default for InMemoryMessageHistoryRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(MessageHistory::default())))
    }
}

#[async_trait]
impl MessageHistoryRepository for InMemoryMessageHistoryRepository {
    async fn append(&self, room: &RoomName, message: ChatMessage) {
        let mut history = self.history.lock().await;
        history.append(room.clone(), message);
    }

    async fn history_of(&self, room: &RoomName) -> Vec<ChatMessage> {
        let history = self.history.lock().await;
        history.history_of(room)
    }
}
