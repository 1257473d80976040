//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! ルームごとの参加者集合と、セッションごとの参加ルームの逆引きを
//! 1 つの `RwLock` で保護します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{RegistryError, RoomId, RoomMember, RoomRegistry, SessionId};

#[derive(Debug, Default)]
struct RegistryState {
    /// room_id → (session_id → member)
    rooms: HashMap<RoomId, HashMap<SessionId, RoomMember>>,
    /// session_id → 参加中の room_id
    sessions: HashMap<SessionId, RoomId>,
}

/// インメモリ Room Registry 実装
///
/// `tokio::sync::RwLock` は書き込み待ちを FIFO で扱うため、
/// スナップショット読み出しが書き込みの後ろで無期限に待たされることはない。
#[derive(Debug, Default)]
pub struct InMemoryRoomRegistry {
    state: RwLock<RegistryState>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 参加者がいるルーム数を取得
    pub async fn room_count(&self) -> usize {
        self.state.read().await.rooms.len()
    }

    /// セッションが参加中のルームを取得
    pub async fn room_of(&self, session_id: &SessionId) -> Option<RoomId> {
        self.state.read().await.sessions.get(session_id).cloned()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn join(&self, room_id: &RoomId, member: RoomMember) -> Result<(), RegistryError> {
        let mut state = self.state.write().await;

        if let Some(current) = state.sessions.get(&member.session_id) {
            if current == room_id {
                tracing::debug!(
                    "Session {} is already in room '{}', join ignored",
                    member.session_id,
                    room_id
                );
                return Ok(());
            }
            return Err(RegistryError::AlreadyJoined {
                session_id: member.session_id,
                current: current.clone(),
            });
        }

        let session_id = member.session_id;
        state.sessions.insert(session_id, room_id.clone());
        state
            .rooms
            .entry(room_id.clone())
            .or_default()
            .insert(session_id, member);
        tracing::debug!("Session {} joined room '{}'", session_id, room_id);

        Ok(())
    }

    async fn leave(&self, room_id: &RoomId, session_id: &SessionId) -> bool {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let Some(members) = state.rooms.get_mut(room_id) else {
            return false;
        };
        let removed = members.remove(session_id).is_some();
        // 空になったルームはその場で片付ける
        if members.is_empty() {
            state.rooms.remove(room_id);
        }

        if removed {
            state.sessions.remove(session_id);
            tracing::debug!("Session {} left room '{}'", session_id, room_id);
        }

        removed
    }

    async fn members(&self, room_id: &RoomId) -> Vec<RoomMember> {
        let state = self.state.read().await;
        state
            .rooms
            .get(room_id)
            .map(|members| members.values().cloned().collect())
            .unwrap_or_default()
    }

    async fn rooms(&self) -> Vec<RoomId> {
        let state = self.state.read().await;
        let mut rooms: Vec<RoomId> = state.rooms.keys().cloned().collect();
        rooms.sort();
        rooms
    }
}
