//! UseCase error types.

use thiserror::Error;

/// Room 詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    /// メンバーも履歴もない Room
    #[error("room '{0}' not found")]
    RoomNotFound(String),
}
