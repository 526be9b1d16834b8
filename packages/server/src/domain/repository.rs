//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 読み出しはすべて値のコピーを返し、呼び出し側と状態を共有しません。

use async_trait::async_trait;

use super::{ChatMessage, Connection, ConnectionId, DisplayName, RoomName};

/// Connection Registry へのインターフェース
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// `id` の接続を追加または置換する（既存レコードは破棄）
    async fn upsert(&self, id: ConnectionId, name: DisplayName, room: RoomName) -> Connection;

    /// `id` の接続を削除する。存在しなければ何もしない
    async fn remove(&self, id: &ConnectionId);

    /// `id` で接続を検索する
    async fn find(&self, id: &ConnectionId) -> Option<Connection>;

    /// Room に所属する接続をレジストリ順で返す
    async fn list_by_room(&self, room: &RoomName) -> Vec<Connection>;

    /// アクティブな Room 名を重複なしで返す
    async fn list_active_room_names(&self) -> Vec<RoomName>;
}

/// History Buffer へのインターフェース
#[async_trait]
pub trait MessageHistoryRepository: Send + Sync {
    /// Room の履歴にメッセージを追加する（上限を超えたら古いものから破棄）
    async fn append(&self, room: &RoomName, message: ChatMessage);

    /// Room の履歴を古い順に返す
    async fn history_of(&self, room: &RoomName) -> Vec<ChatMessage>;
}
