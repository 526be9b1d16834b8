//! Domain error types.

use thiserror::Error;

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 送信先のクライアントが登録されていない
    #[error("client '{0}' is not registered")]
    ClientNotFound(String),

    /// 送信チャンネルが閉じている
    #[error("failed to push message: {0}")]
    PushFailed(String),

    /// 通知をワイヤ形式に変換できなかった
    #[error("failed to serialize notification: {0}")]
    Serialization(String),
}

/// History Buffer の構築エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("history capacity must be at least 1")]
    ZeroCapacity,
}
