//! JSON Lines Message Store 実装
//!
//! 1 メッセージを 1 行の JSON として追記専用ファイルに書き込みます。
//! プロセスを再起動しても履歴が残ります。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{
    fs::{File, OpenOptions},
    io::AsyncWriteExt,
    sync::Mutex,
};

use crate::{
    domain::{ChatMessage, MessageStore, RoomId, StoreError},
    infrastructure::dto::store::StoredMessageRecord,
};

/// JSON Lines ファイルを使った Message Store 実装
pub struct JsonLinesMessageStore {
    path: PathBuf,
    /// 追記用のファイルハンドル（書き込みを直列化する）
    file: Mutex<File>,
}

impl JsonLinesMessageStore {
    /// ファイルを開く（存在しなければ作成する）
    ///
    /// # Errors
    ///
    /// ファイルを作成・オープンできない場合は `std::io::Error`
    pub async fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        tracing::info!("Message store opened at {}", path.display());
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MessageStore for JsonLinesMessageStore {
    async fn append(&self, message: &ChatMessage) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(&StoredMessageRecord::from(message))
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        line.push('\n');

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(())
    }

    async fn history(
        &self,
        room_id: &RoomId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        // 書き込み途中の行を読まないようにロックを取ってから読む
        let contents = {
            let _file = self.file.lock().await;
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| StoreError::Unavailable(e.to_string()))?
        };

        let mut history: Vec<ChatMessage> = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<StoredMessageRecord>(line) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping malformed message record: {}", e);
                    None
                }
            })
            .filter(|record| record.room_id == room_id.as_str())
            .filter_map(|record| match ChatMessage::try_from(record) {
                Ok(message) => Some(message),
                Err(e) => {
                    tracing::warn!("Skipping invalid message record: {}", e);
                    None
                }
            })
            .collect();

        let skip = history.len().saturating_sub(limit);
        history.drain(..skip);
        Ok(history)
    }
}
