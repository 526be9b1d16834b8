//! Event Dispatcher
//!
//! 全ての入力イベントを 1 本のキューから取り出し、1 件ずつ最後まで処理します。
//! Registry・History Buffer の変更と全ての送信が終わるまで次のイベントには進まないため、
//! 状態へのアクセスはイベントの到着順に直列化されます。

use std::sync::Arc;

use hiroba_shared::time::Clock;
use tokio::sync::mpsc;

use crate::domain::{ChatEvent, ConnectionRepository, MessageHistoryRepository, MessagePusher};

use super::{
    ConnectUseCase, Delivery, DisconnectUseCase, EnterRoomUseCase, RelayActivityUseCase,
    SendMessageUseCase, SendPrivateMessageUseCase,
};

pub struct EventDispatcher {
    connect_usecase: Arc<ConnectUseCase>,
    enter_room_usecase: Arc<EnterRoomUseCase>,
    disconnect_usecase: Arc<DisconnectUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    send_private_message_usecase: Arc<SendPrivateMessageUseCase>,
    relay_activity_usecase: Arc<RelayActivityUseCase>,
}

impl EventDispatcher {
    pub fn new(
        connect_usecase: Arc<ConnectUseCase>,
        enter_room_usecase: Arc<EnterRoomUseCase>,
        disconnect_usecase: Arc<DisconnectUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        send_private_message_usecase: Arc<SendPrivateMessageUseCase>,
        relay_activity_usecase: Arc<RelayActivityUseCase>,
    ) -> Self {
        Self {
            connect_usecase,
            enter_room_usecase,
            disconnect_usecase,
            send_message_usecase,
            send_private_message_usecase,
            relay_activity_usecase,
        }
    }

    /// 同じ依存からすべてのユースケースを組み立てる
    pub fn from_dependencies(
        connections: Arc<dyn ConnectionRepository>,
        history: Arc<dyn MessageHistoryRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::new(
            Arc::new(ConnectUseCase::new(message_pusher.clone(), clock.clone())),
            Arc::new(EnterRoomUseCase::new(
                connections.clone(),
                history.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            Arc::new(DisconnectUseCase::new(
                connections.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            Arc::new(SendMessageUseCase::new(
                connections.clone(),
                history,
                message_pusher.clone(),
                clock,
            )),
            Arc::new(SendPrivateMessageUseCase::new(
                connections.clone(),
                message_pusher.clone(),
            )),
            Arc::new(RelayActivityUseCase::new(connections, message_pusher)),
        )
    }

    /// 1 件のイベントを最後まで処理する
    ///
    /// Message Router に渡したイベントはその結果（`Delivery`）を返す。
    /// 接続・入室・切断のイベントは `None`。
    pub async fn dispatch(&self, event: ChatEvent) -> Option<Delivery> {
        let kind = event.kind();
        let source = event.connection_id().clone();
        tracing::debug!("Dispatching '{}' from '{}'", kind, source);

        let delivery = match event {
            ChatEvent::Connected { id, channel } => {
                self.connect_usecase.execute(id, channel).await;
                None
            }
            ChatEvent::EnterRoom { id, name, room } => {
                self.enter_room_usecase.execute(id, name, room).await;
                None
            }
            ChatEvent::Message { id, name, text } => {
                Some(self.send_message_usecase.execute(id, name, text).await)
            }
            ChatEvent::PrivateMessage {
                sender_id,
                target_id,
                text,
            } => Some(
                self.send_private_message_usecase
                    .execute(sender_id, target_id, text)
                    .await,
            ),
            ChatEvent::Activity { id, name } => {
                Some(self.relay_activity_usecase.execute(id, name).await)
            }
            ChatEvent::Disconnected { id } => {
                self.disconnect_usecase.execute(id).await;
                None
            }
        };

        match delivery {
            Some(Delivery::Delivered { recipients }) => tracing::debug!(
                "Delivered '{}' from '{}' to {} recipient(s)",
                kind,
                source,
                recipients
            ),
            Some(Delivery::Dropped) => {
                tracing::debug!("Dropped '{}' from '{}'", kind, source)
            }
            None => {}
        }

        delivery
    }

    /// キューが閉じるまでイベントを到着順に処理する
    pub async fn run(self: Arc<Self>, mut events: mpsc::UnboundedReceiver<ChatEvent>) {
        tracing::info!("Event dispatcher started");
        while let Some(event) = events.recv().await {
            self.dispatch(event).await;
        }
        tracing::info!("Event dispatcher stopped");
    }
}
