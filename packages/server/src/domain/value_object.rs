//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::error::ValueObjectError;

/// Maximum length (in characters) of identities and room identifiers
pub const MAX_ID_LENGTH: usize = 100;

/// Identity of an authenticated user (the username).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// Create a new Identity.
    ///
    /// # Arguments
    ///
    /// * `username` - The username resolved from a credential
    ///
    /// # Returns
    ///
    /// A Result containing the Identity or an error if validation fails
    pub fn new(username: String) -> Result<Self, ValueObjectError> {
        if username.is_empty() {
            return Err(ValueObjectError::IdentityEmpty);
        }
        let len = username.chars().count();
        if len > MAX_ID_LENGTH {
            return Err(ValueObjectError::IdentityTooLong {
                max: MAX_ID_LENGTH,
                actual: len,
            });
        }
        Ok(Self(username))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Identity {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room identifier value object.
///
/// Supplied by the client in the request path, so it is only checked for
/// shape, never against any ownership record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    /// Create a new RoomId.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::RoomIdEmpty);
        }
        let len = id.chars().count();
        if len > MAX_ID_LENGTH {
            return Err(ValueObjectError::RoomIdTooLong {
                max: MAX_ID_LENGTH,
                actual: len,
            });
        }
        if id.contains('/') {
            return Err(ValueObjectError::RoomIdInvalidFormat(id));
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-generated identifier of one live connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Unix timestamp in JST, milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_accepts_username() {
        // テスト項目: 通常のユーザー名から Identity を生成できる
        // when (操作):
        let result = Identity::new("alice".to_string());

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_identity_rejects_empty() {
        // テスト項目: 空文字列の Identity はエラーになる
        // when (操作):
        let result = Identity::new(String::new());

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::IdentityEmpty));
    }

    #[test]
    fn test_identity_rejects_too_long() {
        // テスト項目: 101 文字の Identity はエラーになる
        // given (前提条件):
        let username = "a".repeat(101);

        // when (操作):
        let result = Identity::new(username);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::IdentityTooLong {
                max: 100,
                actual: 101
            })
        );
    }

    #[test]
    fn test_identity_length_counts_characters() {
        // テスト項目: マルチバイト文字はバイト数ではなく文字数で数える
        // given (前提条件):
        let username = "縁".repeat(100);

        // when (操作):
        let result = Identity::new(username);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_room_id_accepts_path_segment() {
        // テスト項目: パスから取り出した文字列で RoomId を生成できる
        // when (操作):
        let result = RoomId::try_from("r1".to_string());

        // then (期待する結果):
        assert_eq!(result.unwrap().to_string(), "r1");
    }

    #[test]
    fn test_room_id_rejects_empty_and_slash() {
        // テスト項目: 空文字列と '/' を含む RoomId はエラーになる
        // when (操作):
        let empty = RoomId::new(String::new());
        let nested = RoomId::new("a/b".to_string());

        // then (期待する結果):
        assert_eq!(empty, Err(ValueObjectError::RoomIdEmpty));
        assert_eq!(
            nested,
            Err(ValueObjectError::RoomIdInvalidFormat("a/b".to_string()))
        );
    }

    #[test]
    fn test_timestamp_ordering() {
        // テスト項目: Timestamp は値で比較される
        // when (操作):
        let earlier = Timestamp::new(1000);
        let later = Timestamp::new(2000);

        // then (期待する結果):
        assert!(earlier < later);
        assert_eq!(later.value(), 2000);
    }
}
