//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - Registry への登録とセッションの Joined への遷移
//!
//! ### どのような状況を想定しているか
//! - 正常系：Connecting 状態のセッションの参加
//! - 異常系：別ルームに参加済みのセッション、Closed 状態のセッション

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{PusherChannel, RoomRegistry, Session, SessionError, SessionStatus, Timestamp};

use super::error::JoinRoomError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Registry（参加者集合の管理）
    registry: Arc<dyn RoomRegistry>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// ルーム参加を実行
    ///
    /// セッションが作成時に記録したルームに、`channel` を送信先として登録する。
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 参加成功（セッションは Joined）
    /// * `Err(JoinRoomError)` - 参加失敗（Registry は変更されない）
    pub async fn execute(
        &self,
        session: &mut Session,
        channel: PusherChannel,
    ) -> Result<(), JoinRoomError> {
        if session.status() != SessionStatus::Connecting {
            return Err(SessionError::InvalidTransition {
                from: session.status(),
                to: SessionStatus::Joined,
            }
            .into());
        }

        let joined_at = Timestamp::new(self.clock.now_jst_millis());
        let room_id = session.room_id().clone();
        self.registry
            .join(&room_id, session.to_member(channel, joined_at))
            .await?;
        session.mark_joined()?;

        tracing::info!(
            "Session {} ('{}') joined room '{}'",
            session.id(),
            session.identity(),
            room_id
        );
        Ok(())
    }
}
