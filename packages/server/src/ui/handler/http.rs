//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomName,
    infrastructure::dto::{
        http::{HistoryEntryDto, RoomDetailDto, RoomSummaryDto},
        websocket::UserInfo,
    },
    ui::state::AppState,
    usecase::GetRoomDetailError,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of active rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let room_summaries: Vec<RoomSummaryDto> = rooms
        .into_iter()
        .map(|room| RoomSummaryDto {
            name: room.name.into_string(),
            users: room.users.into_iter().map(UserInfo::from).collect(),
        })
        .collect();

    Json(room_summaries)
}

/// Get room detail (members and history) by name
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    match state
        .get_room_detail_usecase
        .execute(RoomName::new(room))
        .await
    {
        Ok(room) => {
            // Domain Model から DTO への変換
            let room_detail = RoomDetailDto {
                name: room.name.into_string(),
                users: room.users.into_iter().map(UserInfo::from).collect(),
                history: room
                    .history
                    .into_iter()
                    .map(HistoryEntryDto::from)
                    .collect(),
            };
            Ok(Json(room_detail))
        }
        Err(GetRoomDetailError::RoomNotFound(name)) => {
            tracing::debug!("Room '{}' not found", name);
            Err(StatusCode::NOT_FOUND)
        }
    }
}
