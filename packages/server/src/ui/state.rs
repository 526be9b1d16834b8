//! Server state shared by the handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::ChatEvent,
    usecase::{GetRoomDetailUseCase, GetRoomsUseCase},
};

/// Shared application state
pub struct AppState {
    /// EventDispatcher へのイベントキュー（全ての WebSocket 入力はここを通る）
    pub events: mpsc::UnboundedSender<ChatEvent>,
    /// GetRoomsUseCase（Room 一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（Room 詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}

impl AppState {
    /// イベントを EventDispatcher に渡す
    ///
    /// Dispatcher が停止している場合（シャットダウン中）は破棄する。
    pub fn submit(&self, event: ChatEvent) {
        let kind = event.kind();
        if self.events.send(event).is_err() {
            tracing::warn!("Event dispatcher is gone, dropping '{}' event", kind);
        }
    }
}
