//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RegistryError, SessionError};

/// 認証のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthenticateError {
    /// ハンドシェイクに資格情報がない
    #[error("Missing bearer credential")]
    MissingCredential,

    /// 資格情報を解決できない
    #[error("Unauthorized")]
    Unauthorized,
}

/// ルーム参加のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinRoomError {
    /// 別のルームに参加済み
    #[error(transparent)]
    AlreadyJoined(#[from] RegistryError),

    /// セッションが Connecting 状態ではない
    #[error(transparent)]
    InvalidSession(#[from] SessionError),
}

/// メッセージ送信のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// 参加していないセッションからの送信
    #[error("Session {0} is not joined to a room")]
    NotJoined(String),
}

/// ルーム詳細取得のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GetRoomDetailError {
    #[error("Room not found")]
    RoomNotFound,
}

/// 履歴取得のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GetRoomHistoryError {
    #[error("Message store unavailable: {0}")]
    StoreUnavailable(String),
}
