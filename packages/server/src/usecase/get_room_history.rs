//! UseCase: ルームのメッセージ履歴取得

use std::sync::Arc;

use crate::domain::{ChatMessage, MessageStore, RoomId};

use super::error::GetRoomHistoryError;

/// 履歴取得件数の既定値
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// 履歴取得件数の上限
pub const MAX_HISTORY_LIMIT: usize = 1000;

/// 履歴取得のユースケース
pub struct GetRoomHistoryUseCase {
    message_store: Arc<dyn MessageStore>,
}

impl GetRoomHistoryUseCase {
    /// 新しい GetRoomHistoryUseCase を作成
    pub fn new(message_store: Arc<dyn MessageStore>) -> Self {
        Self { message_store }
    }

    /// 直近のメッセージを古い順に取得
    ///
    /// `limit` は省略時 50 件、最大 1000 件に丸める。
    pub async fn execute(
        &self,
        room_id: &RoomId,
        limit: Option<usize>,
    ) -> Result<Vec<ChatMessage>, GetRoomHistoryError> {
        let limit = limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .min(MAX_HISTORY_LIMIT);
        self.message_store
            .history(room_id, limit)
            .await
            .map_err(|e| GetRoomHistoryError::StoreUnavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockMessageStore, StoreError};

    fn room() -> RoomId {
        RoomId::new("r1".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_history_limit_defaults_and_caps() {
        // テスト項目: limit は省略時 50、上限 1000 に丸めて Store に渡される
        // given (前提条件):
        let mut store = MockMessageStore::new();
        store
            .expect_history()
            .withf(|_, limit| *limit == DEFAULT_HISTORY_LIMIT)
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        store
            .expect_history()
            .withf(|_, limit| *limit == MAX_HISTORY_LIMIT)
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        let usecase = GetRoomHistoryUseCase::new(Arc::new(store));

        // when (操作):
        let defaulted = usecase.execute(&room(), None).await;
        let capped = usecase.execute(&room(), Some(1_000_000)).await;

        // then (期待する結果):
        assert!(defaulted.unwrap().is_empty());
        assert!(capped.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_store_unavailable() {
        // テスト項目: Store の失敗は StoreUnavailable になる
        // given (前提条件):
        let mut store = MockMessageStore::new();
        store
            .expect_history()
            .returning(|_, _| Err(StoreError::Unavailable("disk full".to_string())));
        let usecase = GetRoomHistoryUseCase::new(Arc::new(store));

        // when (操作):
        let result = usecase.execute(&room(), Some(10)).await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(GetRoomHistoryError::StoreUnavailable(_))
        ));
    }
}
