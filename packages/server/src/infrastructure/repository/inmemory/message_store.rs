//! InMemory Message Store 実装
//!
//! ルームごとのメッセージ履歴を `Vec` に追記していく。プロセス終了で消える。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageStore, RoomId, StoreError};

/// インメモリ Message Store 実装
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    messages: Mutex<HashMap<RoomId, Vec<ChatMessage>>>,
}

impl InMemoryMessageStore {
    /// 新しい InMemoryMessageStore を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 全ルームの保存済みメッセージ数を取得
    pub async fn count(&self) -> usize {
        self.messages.lock().await.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, message: &ChatMessage) -> Result<(), StoreError> {
        let mut messages = self.messages.lock().await;
        messages
            .entry(message.room_id.clone())
            .or_default()
            .push(message.clone());
        Ok(())
    }

    async fn history(
        &self,
        room_id: &RoomId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        let messages = self.messages.lock().await;
        let history = messages
            .get(room_id)
            .map(|room_messages| {
                let skip = room_messages.len().saturating_sub(limit);
                room_messages[skip..].to_vec()
            })
            .unwrap_or_default();
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Identity, Timestamp};

    fn message(room: &str, sender: &str, text: &str, at: i64) -> ChatMessage {
        ChatMessage::new(
            RoomId::new(room.to_string()).unwrap(),
            Identity::new(sender.to_string()).unwrap(),
            text.to_string(),
            Timestamp::new(at),
        )
    }

    #[tokio::test]
    async fn test_append_and_history_per_room() {
        // テスト項目: 追記したメッセージがルームごとに古い順で取得できる
        // given (前提条件):
        let store = InMemoryMessageStore::new();
        store.append(&message("r1", "A", "one", 1)).await.unwrap();
        store.append(&message("r2", "B", "other", 2)).await.unwrap();
        store.append(&message("r1", "B", "two", 3)).await.unwrap();

        // when (操作):
        let history = store
            .history(&RoomId::new("r1".to_string()).unwrap(), 10)
            .await
            .unwrap();

        // then (期待する結果):
        let texts: Vec<&str> = history.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
        assert_eq!(store.count().await, 3);
    }

    #[tokio::test]
    async fn test_history_limit_keeps_most_recent() {
        // テスト項目: limit を超える場合は直近のメッセージだけ返す
        // given (前提条件):
        let store = InMemoryMessageStore::new();
        for i in 0..5 {
            store
                .append(&message("r1", "A", &format!("m{}", i), i))
                .await
                .unwrap();
        }

        // when (操作):
        let history = store
            .history(&RoomId::new("r1".to_string()).unwrap(), 2)
            .await
            .unwrap();

        // then (期待する結果):
        let texts: Vec<&str> = history.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["m3", "m4"]);
    }

    #[tokio::test]
    async fn test_history_of_unknown_room_is_empty() {
        // テスト項目: 履歴のないルームは空のリスト
        // given (前提条件):
        let store = InMemoryMessageStore::new();

        // when (操作):
        let history = store
            .history(&RoomId::new("nowhere".to_string()).unwrap(), 10)
            .await
            .unwrap();

        // then (期待する結果):
        assert!(history.is_empty());
    }
}
