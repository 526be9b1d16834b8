//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::UserInfo;

/// Entry of `GET /api/rooms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub users: Vec<UserInfo>,
}

/// Body of `GET /api/rooms/{room}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub name: String,
    pub users: Vec<UserInfo>,
    pub history: Vec<HistoryEntryDto>,
}

/// A stored room message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryDto {
    pub name: String,
    pub text: String,
    pub time: String,
}
