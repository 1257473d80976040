//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - ルームへのブロードキャストとメッセージの永続化
//!
//! ### なぜこのテストが必要か
//! - 受理したメッセージは配信結果（0〜N 人）に関係なく必ず 1 回だけ永続化される
//! - 永続化の失敗は接続を切らずにログに残すだけ
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数参加者への配信と永続化
//! - 異常系：Message Store が利用できない
//! - エッジケース：全員への配信が失敗しても永続化される

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    BroadcastReport, ChatMessage, MessagePusher, MessageStore, Session, SessionStatus, Timestamp,
};

use super::error::SendMessageError;

/// 1 件のメッセージ送信の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutcome {
    /// 受理したメッセージ
    pub message: ChatMessage,
    /// ブロードキャストの結果
    pub report: BroadcastReport,
    /// Message Store への追記に成功したか
    pub persisted: bool,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// MessagePusher（ルームへのファンアウト）
    message_pusher: Arc<dyn MessagePusher>,
    /// MessageStore（履歴の永続化）
    message_store: Arc<dyn MessageStore>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        message_pusher: Arc<dyn MessagePusher>,
        message_store: Arc<dyn MessageStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            message_pusher,
            message_store,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// 1. `"{identity}: {text}"` をルームの全参加者にブロードキャスト
    /// 2. 配信結果に関係なく、生のテキストを Message Store に追記
    ///
    /// # Arguments
    ///
    /// * `session` - 送信元のセッション（Joined であること）
    /// * `text` - 受信したテキストフレームの内容
    ///
    /// # Returns
    ///
    /// * `Ok(SendOutcome)` - 受理された（配信・永続化の成否は結果に含まれる）
    /// * `Err(SendMessageError)` - セッションが参加していない
    pub async fn execute(
        &self,
        session: &Session,
        text: String,
    ) -> Result<SendOutcome, SendMessageError> {
        if session.status() != SessionStatus::Joined {
            return Err(SendMessageError::NotJoined(session.id().to_string()));
        }

        let message = ChatMessage::new(
            session.room_id().clone(),
            session.identity().clone(),
            text,
            Timestamp::new(self.clock.now_jst_millis()),
        );

        let report = self
            .message_pusher
            .broadcast(&message.room_id, &message.to_frame())
            .await;
        tracing::debug!(
            "Message from '{}' delivered to {} member(s) of room '{}' ({} evicted)",
            message.sender,
            report.delivered,
            message.room_id,
            report.evicted.len()
        );

        let persisted = match self.message_store.append(&message).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "Failed to persist message from '{}' in room '{}': {}",
                    message.sender,
                    message.room_id,
                    e
                );
                false
            }
        };

        Ok(SendOutcome {
            message,
            report,
            persisted,
        })
    }
}
