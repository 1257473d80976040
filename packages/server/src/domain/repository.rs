//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ChatMessage, RegistryError, RoomId, RoomMember, SessionId, StoreError};

/// Room Registry trait
///
/// ルーム ID から、そのルームに参加中のセッション集合への対応を管理する。
///
/// - 1 つのセッションは同時に 1 つのルームにしか所属しない
/// - `members` は常にスナップショット（コピー）を返し、内部の集合を外に出さない
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// セッションをルームに参加させる
    ///
    /// 同じ (room_id, session) での再参加は何もしない。
    /// 別のルームに参加済みの場合は `RegistryError::AlreadyJoined`。
    async fn join(&self, room_id: &RoomId, member: RoomMember) -> Result<(), RegistryError>;

    /// セッションをルームから外す
    ///
    /// 参加していなければ何もしない。実際に削除した場合のみ `true`。
    async fn leave(&self, room_id: &RoomId, session_id: &SessionId) -> bool;

    /// ルームの参加者のスナップショットを取得
    async fn members(&self, room_id: &RoomId) -> Vec<RoomMember>;

    /// 参加者が 1 人以上いるルームの ID 一覧を取得
    async fn rooms(&self) -> Vec<RoomId>;
}

/// Message Store trait
///
/// チャットメッセージをルーム単位で永続化する外部コラボレーターへのインターフェース。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// メッセージを追記する
    async fn append(&self, message: &ChatMessage) -> Result<(), StoreError>;

    /// ルームの直近 `limit` 件のメッセージを古い順に取得
    async fn history(&self, room_id: &RoomId, limit: usize)
    -> Result<Vec<ChatMessage>, StoreError>;
}
