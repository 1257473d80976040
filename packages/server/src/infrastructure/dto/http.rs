//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// Room summary for `GET /api/rooms`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    /// Usernames of the joined sessions, sorted
    pub participants: Vec<String>,
}

/// Joined session for `GET /api/rooms/{room_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantDetailDto {
    pub session_id: String,
    pub username: String,
    /// RFC 3339 (JST), omitted when the timestamp is out of range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<String>,
}

/// Room detail for `GET /api/rooms/{room_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub participants: Vec<ParticipantDetailDto>,
}

/// Stored message for `GET /api/rooms/{room_id}/messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub room_id: String,
    pub username: String,
    pub message: String,
    /// RFC 3339 (JST), omitted when the timestamp is out of range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Query parameters for `GET /api/rooms/{room_id}/messages`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}
