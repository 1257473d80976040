//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    domain::{RoomId, Timestamp},
    infrastructure::dto::http::{
        HistoryQuery, MessageDto, ParticipantDetailDto, RoomDetailDto, RoomSummaryDto,
    },
    ui::state::AppState,
    usecase::{GetRoomDetailError, GetRoomHistoryError},
};
use hiroba_shared::time::timestamp_to_jst_rfc3339;

fn to_rfc3339(timestamp: Timestamp) -> Option<String> {
    let rendered = timestamp_to_jst_rfc3339(timestamp.value());
    if rendered.is_none() {
        tracing::warn!("Timestamp {} is out of range, omitting it", timestamp.value());
    }
    rendered
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms with at least one joined session
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let room_summaries: Vec<RoomSummaryDto> = rooms
        .into_iter()
        .map(|room| RoomSummaryDto {
            id: room.id.as_str().to_string(),
            participants: room
                .members
                .iter()
                .map(|m| m.identity.as_str().to_string())
                .collect(),
        })
        .collect();

    Json(room_summaries)
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    match state.get_room_detail_usecase.execute(room_id).await {
        Ok(room) => {
            // Domain Model から DTO への変換
            let room_detail = RoomDetailDto {
                id: room.id.as_str().to_string(),
                participants: room
                    .members
                    .iter()
                    .map(|m| ParticipantDetailDto {
                        session_id: m.session_id.to_string(),
                        username: m.identity.as_str().to_string(),
                        joined_at: to_rfc3339(m.joined_at),
                    })
                    .collect(),
            };
            Ok(Json(room_detail))
        }
        Err(GetRoomDetailError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
    }
}

/// Get stored message history of a room
pub async fn get_room_messages(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<MessageDto>>, StatusCode> {
    let room_id = RoomId::new(room_id).map_err(|_| StatusCode::NOT_FOUND)?;

    match state
        .get_room_history_usecase
        .execute(&room_id, query.limit)
        .await
    {
        Ok(messages) => Ok(Json(
            messages
                .into_iter()
                .map(|m| MessageDto {
                    room_id: m.room_id.as_str().to_string(),
                    username: m.sender.as_str().to_string(),
                    message: m.text,
                    timestamp: to_rfc3339(m.received_at),
                })
                .collect(),
        )),
        Err(GetRoomHistoryError::StoreUnavailable(e)) => {
            tracing::error!("Failed to read history of room '{}': {}", room_id, e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rfc3339_renders_jst() {
        // テスト項目: タイムスタンプは JST の RFC 3339 で表示される
        // when (操作):
        let rendered = to_rfc3339(Timestamp::new(0));

        // then (期待する結果):
        assert_eq!(rendered.as_deref(), Some("1970-01-01T09:00:00+09:00"));
    }

    #[test]
    fn test_out_of_range_timestamp_is_omitted() {
        // テスト項目: 表示できないタイムスタンプは空文字ではなくフィールドごと省略される
        // given (前提条件):
        let dto = MessageDto {
            room_id: "r1".to_string(),
            username: "A".to_string(),
            message: "hi".to_string(),
            timestamp: to_rfc3339(Timestamp::new(i64::MAX)),
        };

        // when (操作):
        let json = serde_json::to_value(&dto).unwrap();

        // then (期待する結果):
        assert!(dto.timestamp.is_none());
        assert!(json.get("timestamp").is_none());
        assert_eq!(json["message"], "hi");
    }
}
