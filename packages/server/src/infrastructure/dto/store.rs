//! Message store record DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::{ChatMessage, Identity, RoomId, Timestamp, ValueObjectError};

/// One persisted chat message (one line of the JSON Lines store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessageRecord {
    pub room_id: String,
    pub username: String,
    pub message: String,
    /// Unix timestamp (milliseconds since epoch) in JST
    pub timestamp: i64,
}

impl From<&ChatMessage> for StoredMessageRecord {
    fn from(message: &ChatMessage) -> Self {
        Self {
            room_id: message.room_id.as_str().to_string(),
            username: message.sender.as_str().to_string(),
            message: message.text.clone(),
            timestamp: message.received_at.value(),
        }
    }
}

impl TryFrom<StoredMessageRecord> for ChatMessage {
    type Error = ValueObjectError;

    fn try_from(record: StoredMessageRecord) -> Result<Self, Self::Error> {
        Ok(ChatMessage::new(
            RoomId::new(record.room_id)?,
            Identity::new(record.username)?,
            record.message,
            Timestamp::new(record.timestamp),
        ))
    }
}
