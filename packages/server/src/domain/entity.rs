//! Domain entities.

use std::collections::{HashMap, VecDeque};

use super::{
    ConnectionId, DisplayName, HistoryError, MessageText, RoomName,
    room_directory::{active_room_names, members_of},
};

/// Room に入室している 1 つのクライアントセッション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    pub name: DisplayName,
    pub room: RoomName,
}

impl Connection {
    pub fn new(id: ConnectionId, name: DisplayName, room: RoomName) -> Self {
        Self { id, name, room }
    }
}

/// 送信時点で確定し、以後変更されないメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender_name: DisplayName,
    pub text: MessageText,
    /// ローカル時刻 `HH:MM:SS`
    pub time: String,
}

impl ChatMessage {
    pub fn new(sender_name: DisplayName, text: MessageText, time: String) -> Self {
        Self {
            sender_name,
            text,
            time,
        }
    }

    /// 予約済み送信者名による管理者通知を作成
    pub fn admin(text: impl Into<String>, time: String) -> Self {
        Self::new(DisplayName::admin(), MessageText::new(text), time)
    }
}

/// Connection Registry
///
/// Room に入室済みの接続を保持します。ID は一意で、`upsert` は同じ ID の
/// 既存レコードを破棄してから末尾に追加します（マージはしません）。
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    connections: Vec<Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 接続を追加または置換する
    pub fn upsert(&mut self, id: ConnectionId, name: DisplayName, room: RoomName) -> Connection {
        self.connections.retain(|connection| connection.id != id);
        let connection = Connection::new(id, name, room);
        self.connections.push(connection.clone());
        connection
    }

    /// 接続を削除する。存在しなければ何もしない
    pub fn remove(&mut self, id: &ConnectionId) -> Option<Connection> {
        let index = self
            .connections
            .iter()
            .position(|connection| &connection.id == id)?;
        Some(self.connections.remove(index))
    }

    pub fn find(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections
            .iter()
            .find(|connection| &connection.id == id)
    }

    pub fn list_by_room(&self, room: &RoomName) -> Vec<Connection> {
        members_of(&self.connections, room)
    }

    pub fn list_active_room_names(&self) -> Vec<RoomName> {
        active_room_names(&self.connections)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

/// History Buffer
///
/// Room 名ごとに直近のメッセージを古い順に保持します。上限を超えた分は
/// 最も古いものから破棄されます（FIFO）。バッファは最初のメッセージで作られ、
/// Room が空になっても削除されません。
#[derive(Debug, Clone)]
pub struct MessageHistory {
    capacity: usize,
    rooms: HashMap<RoomName, VecDeque<ChatMessage>>,
}

impl MessageHistory {
    /// 上限を指定して作成する。上限 0 は受け付けない
    pub fn with_capacity(capacity: usize) -> Result<Self, HistoryError> {
        if capacity == 0 {
            return Err(HistoryError::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            rooms: HashMap::new(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// メッセージを追加し、上限を超えた分を古い順に破棄する
    pub fn append(&mut self, room: RoomName, message: ChatMessage) {
        let capacity = self.capacity;
        let buffer = self
            .rooms
            .entry(room)
            .or_insert_with(|| VecDeque::with_capacity(capacity));
        buffer.push_back(message);
        while buffer.len() > capacity {
            buffer.pop_front();
        }
    }

    /// Room の履歴を古い順に返す。履歴がなければ空
    pub fn history_of(&self, room: &RoomName) -> Vec<ChatMessage> {
        self.rooms
            .get(room)
            .map(|buffer| buffer.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for MessageHistory {
    fn default() -> Self {
        Self {
            capacity: super::DEFAULT_HISTORY_CAPACITY,
            rooms: HashMap::new(),
        }
    }
}
