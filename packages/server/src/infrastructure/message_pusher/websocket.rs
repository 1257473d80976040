//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - Registry からルームの参加者スナップショットを取得し、各参加者の
//!   `PusherChannel` にメッセージを渡す
//! - 配信に失敗した参加者（送信タスクが終了済み）をルームから外す
//! - 同じルームへのブロードキャストを直列化する
//!
//! ## 設計ノート
//!
//! WebSocket の送受信は UI 層（`src/ui/handler/websocket.rs`）のセッションタスクだけが行います。
//! この実装はチャンネルにメッセージを積むだけで、トランスポートには触れません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::domain::{BroadcastReport, MessagePusher, RoomId, RoomRegistry};

/// ルームごとの配信順序を守るためのゲート
type RoomGate = Arc<Mutex<()>>;

/// WebSocket を使った MessagePusher 実装
///
/// ## フィールド
///
/// - `registry`: 参加者集合の取得とエビクションに使う Room Registry
/// - `gates`: 配信中のルームのゲート。使われていないゲートは配信後に片付ける
///
/// ## 使用例
///
/// ```ignore
/// let registry = Arc::new(InMemoryRoomRegistry::new());
/// let pusher = WebSocketMessagePusher::new(registry.clone());
///
/// let report = pusher.broadcast(&room_id, "alice: hello").await;
/// ```
pub struct WebSocketMessagePusher {
    registry: Arc<dyn RoomRegistry>,
    gates: Mutex<HashMap<RoomId, RoomGate>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self {
            registry,
            gates: Mutex::new(HashMap::new()),
        }
    }

    async fn gate_for(&self, room_id: &RoomId) -> RoomGate {
        let mut gates = self.gates.lock().await;
        gates.entry(room_id.clone()).or_default().clone()
    }

    /// 誰も保持していないゲートを削除する
    async fn release_gate(&self, room_id: &RoomId, gate: RoomGate) {
        let mut gates = self.gates.lock().await;
        drop(gate);
        if gates
            .get(room_id)
            .is_some_and(|held| Arc::strong_count(held) == 1)
        {
            gates.remove(room_id);
        }
    }

    /// 配信中のルーム数を取得
    pub async fn active_gates(&self) -> usize {
        self.gates.lock().await.len()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn broadcast(&self, room_id: &RoomId, content: &str) -> BroadcastReport {
        let gate = self.gate_for(room_id).await;
        let mut report = BroadcastReport::default();

        {
            let _turn = gate.lock().await;
            let members = self.registry.members(room_id).await;

            for member in members {
                // ブロードキャストでは一部の送信失敗を許容
                // 閉じたチャンネルと満杯のキューはどちらも配信失敗
                match member.channel.try_send(content.to_string()) {
                    Ok(()) => {
                        report.delivered += 1;
                        tracing::debug!(
                            "Broadcasted message to session {} ('{}')",
                            member.session_id,
                            member.identity
                        );
                    }
                    Err(e) => {
                        let reason = match e {
                            TrySendError::Full(_) => "outbound queue full",
                            TrySendError::Closed(_) => "channel closed",
                        };
                        tracing::warn!(
                            "Failed to push message to session {} ('{}') in room '{}' ({}), evicting",
                            member.session_id,
                            member.identity,
                            room_id,
                            reason
                        );
                        self.registry.leave(room_id, &member.session_id).await;
                        report.evicted.push(member.session_id);
                    }
                }
            }
        }

        self.release_gate(room_id, gate).await;
        report
    }
}
