//! UseCase layer.
//!
//! - Session Coordinator: `ConnectUseCase`, `EnterRoomUseCase`, `DisconnectUseCase`
//! - Message Router: `SendMessageUseCase`, `SendPrivateMessageUseCase`, `RelayActivityUseCase`
//! - Room queries for the HTTP API: `GetRoomsUseCase`, `GetRoomDetailUseCase`
//! - `EventDispatcher`: inbound events are handled one at a time, to completion

mod connect;
mod delivery;
mod disconnect;
mod dispatcher;
mod enter_room;
mod error;
mod get_room_detail;
mod get_rooms;
mod relay_activity;
mod send_message;
mod send_private_message;

#[cfg(test)]
pub(crate) mod test_support;

pub use connect::ConnectUseCase;
pub use delivery::Delivery;
pub use disconnect::DisconnectUseCase;
pub use dispatcher::EventDispatcher;
pub use enter_room::EnterRoomUseCase;
pub use error::GetRoomDetailError;
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::{GetRoomsUseCase, RoomSnapshot};
pub use relay_activity::RelayActivityUseCase;
pub use send_message::SendMessageUseCase;
pub use send_private_message::SendPrivateMessageUseCase;

use crate::domain::{ConnectionId, MessagePusher, Notification};

/// 1 つのクライアントへ送信し、失敗はログに残して続行する
async fn push_or_warn(pusher: &dyn MessagePusher, target: &ConnectionId, notification: &Notification) {
    if let Err(e) = pusher.push_to(target, notification).await {
        tracing::warn!("Failed to push to '{}': {}", target, e);
    }
}

/// 複数のクライアントへ送信し、失敗はログに残して続行する
async fn broadcast_or_warn(
    pusher: &dyn MessagePusher,
    targets: Vec<ConnectionId>,
    notification: &Notification,
) {
    if targets.is_empty() {
        return;
    }
    if let Err(e) = pusher.broadcast(targets, notification).await {
        tracing::warn!("Failed to broadcast: {}", e);
    }
}

/// 全クライアントへ送信し、失敗はログに残して続行する
async fn broadcast_all_or_warn(pusher: &dyn MessagePusher, notification: &Notification) {
    if let Err(e) = pusher.broadcast_all(notification).await {
        tracing::warn!("Failed to broadcast to all clients: {}", e);
    }
}
