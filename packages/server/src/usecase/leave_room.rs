//! UseCase: ルーム退出（切断）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - Registry からの削除、セッションのクローズ、退出通知のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 切断したセッションへの配信が残らないことを保証する
//! - 退出通知の配信失敗が呼び出し元に伝わらないことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：残りの参加者への退出通知
//! - エッジケース：最後の参加者の切断（ルームが空になる）
//! - エッジケース：ブロードキャスト中に既にエビクトされていたセッション

use std::sync::Arc;

use crate::domain::{
    BroadcastReport, DEPARTURE_NOTICE, MessagePusher, RoomRegistry, Session, SessionStatus,
};

/// 退出処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveOutcome {
    /// Registry から実際に削除したか（既にエビクト済みなら false）
    pub removed: bool,
    /// 退出通知の配信結果（参加していなかった場合は None）
    pub notice: Option<BroadcastReport>,
}

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// Registry（参加者集合の管理）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（退出通知の配信）
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 退出を実行
    ///
    /// 1. セッション作成時に記録したルームから Leave
    /// 2. セッションを Closed に遷移
    /// 3. 参加していた場合はルームに退出通知をブロードキャスト（失敗は無視）
    pub async fn execute(&self, session: &mut Session) -> LeaveOutcome {
        let room_id = session.room_id().clone();
        let removed = self.registry.leave(&room_id, &session.id()).await;
        let previous = session.close();

        if previous != SessionStatus::Joined {
            tracing::debug!(
                "Session {} closed without joining room '{}'",
                session.id(),
                room_id
            );
            return LeaveOutcome {
                removed,
                notice: None,
            };
        }

        tracing::info!(
            "Session {} ('{}') left room '{}'",
            session.id(),
            session.identity(),
            room_id
        );

        let notice = self
            .message_pusher
            .broadcast(&room_id, DEPARTURE_NOTICE)
            .await;
        if !notice.evicted.is_empty() {
            tracing::debug!(
                "Departure notice for room '{}' evicted {} stale session(s)",
                room_id,
                notice.evicted.len()
            );
        }

        LeaveOutcome {
            removed,
            notice: Some(notice),
        }
    }
}
