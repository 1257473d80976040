//! Core domain models for the chat fan-out server.

use serde::{Deserialize, Serialize};

use super::{
    error::SessionError,
    message_pusher::PusherChannel,
    value_object::{Identity, RoomId, SessionId, Timestamp},
};

/// Plain notice delivered to a room after one of its members disconnects
pub const DEPARTURE_NOTICE: &str = "Have a great day!";

/// Lifecycle status of a connection session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    /// Authenticated, not yet registered in a room
    Connecting,
    /// Registered in the room registry
    Joined,
    /// Terminal
    Closed,
}

/// Server-side state of one live connection.
///
/// The identity and room are fixed at creation; leaving always targets the
/// room captured here.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    identity: Identity,
    room_id: RoomId,
    status: SessionStatus,
    connected_at: Timestamp,
}

impl Session {
    /// Create a session for an authenticated connection (status `Connecting`)
    pub fn new(
        id: SessionId,
        identity: Identity,
        room_id: RoomId,
        connected_at: Timestamp,
    ) -> Self {
        Self {
            id,
            identity,
            room_id,
            status: SessionStatus::Connecting,
            connected_at,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn connected_at(&self) -> Timestamp {
        self.connected_at
    }

    /// Transition `Connecting → Joined`
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` from any other status
    pub fn mark_joined(&mut self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::Connecting => {
                self.status = SessionStatus::Joined;
                Ok(())
            }
            from => Err(SessionError::InvalidTransition {
                from,
                to: SessionStatus::Joined,
            }),
        }
    }

    /// Transition to `Closed` and return the previous status.
    ///
    /// Closing twice is harmless.
    pub fn close(&mut self) -> SessionStatus {
        std::mem::replace(&mut self.status, SessionStatus::Closed)
    }

    /// Build the registry back-reference for this session
    pub fn to_member(&self, channel: PusherChannel, joined_at: Timestamp) -> RoomMember {
        RoomMember {
            session_id: self.id,
            identity: self.identity.clone(),
            joined_at,
            channel,
        }
    }
}

/// A session's entry in a room's member set.
///
/// Holds only the outbound channel of the session, never its transport.
#[derive(Debug, Clone)]
pub struct RoomMember {
    pub session_id: SessionId,
    pub identity: Identity,
    pub joined_at: Timestamp,
    pub channel: PusherChannel,
}

/// A chat message accepted by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Room the message was sent to
    pub room_id: RoomId,
    /// Sender's identity
    pub sender: Identity,
    /// Raw text payload, as received
    pub text: String,
    /// Arrival time at the gateway
    pub received_at: Timestamp,
}

impl ChatMessage {
    pub fn new(room_id: RoomId, sender: Identity, text: String, received_at: Timestamp) -> Self {
        Self {
            room_id,
            sender,
            text,
            received_at,
        }
    }

    /// Outbound frame relayed to room members: `"{identity}: {text}"`
    pub fn to_frame(&self) -> String {
        format!("{}: {}", self.sender, self.text)
    }
}
