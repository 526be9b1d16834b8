//! Domain layer for the room chat relay.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod notification;
pub mod repository;
pub mod room_directory;
pub mod value_object;

pub use entity::{ChatMessage, Connection, ConnectionRegistry, MessageHistory};
pub use error::{HistoryError, MessagePushError};
pub use event::ChatEvent;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use notification::Notification;
pub use repository::{ConnectionRepository, MessageHistoryRepository};
pub use value_object::{ConnectionId, DisplayName, MessageText, RoomName};

/// 管理者通知（入室・退室・ウェルカム）に使われる予約済みの送信者名
pub const ADMIN_NAME: &str = "Admin";

/// Room ごとに保持するメッセージ履歴の既定の上限
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;
