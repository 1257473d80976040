//! Domain layer error definitions.

use thiserror::Error;

use super::{RoomId, SessionId, SessionStatus};

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// Identity validation error
    #[error("Identity cannot be empty")]
    IdentityEmpty,

    /// Identity too long error
    #[error("Identity cannot exceed {max} characters (got {actual})")]
    IdentityTooLong { max: usize, actual: usize },

    /// RoomId validation error
    #[error("RoomId cannot be empty")]
    RoomIdEmpty,

    /// RoomId too long error
    #[error("RoomId cannot exceed {max} characters (got {actual})")]
    RoomIdTooLong { max: usize, actual: usize },

    /// RoomId containing a path separator
    #[error("RoomId cannot contain '/' (got: {0})")]
    RoomIdInvalidFormat(String),
}

/// Errors raised by the room registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The session is already a member of another room
    #[error("Session {session_id} is already joined to room '{current}'")]
    AlreadyJoined {
        session_id: SessionId,
        current: RoomId,
    },
}

/// Errors related to the connection session lifecycle
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Requested status change is not allowed from the current status
    #[error("Session cannot transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: SessionStatus,
        to: SessionStatus,
    },
}

/// Errors returned by an identity resolver
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The credential is missing, unknown or malformed
    #[error("Unauthorized")]
    Unauthorized,
}

/// Errors returned by a message store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached or written
    #[error("Message store unavailable: {0}")]
    Unavailable(String),
}
