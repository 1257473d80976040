//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{RoomId, RoomMember, RoomRegistry};

/// 参照用のルームの状態
#[derive(Debug, Clone)]
pub struct RoomView {
    pub id: RoomId,
    /// ユーザー名、参加時刻の順に並べた参加者
    pub members: Vec<RoomMember>,
}

impl RoomView {
    pub(crate) fn new(id: RoomId, mut members: Vec<RoomMember>) -> Self {
        members.sort_by(|a, b| {
            a.identity
                .as_str()
                .cmp(b.identity.as_str())
                .then(a.joined_at.cmp(&b.joined_at))
        });
        Self { id, members }
    }
}

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 参加者がいる全ルームを ID 順に取得
    pub async fn execute(&self) -> Vec<RoomView> {
        let mut views = Vec::new();
        for room_id in self.registry.rooms().await {
            let members = self.registry.members(&room_id).await;
            // 一覧取得とスナップショットの間に空になったルームは除く
            if !members.is_empty() {
                views.push(RoomView::new(room_id, members));
            }
        }
        views
    }
}
