//! UseCase: ルーム詳細取得

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry};

use super::{error::GetRoomDetailError, get_rooms::RoomView};

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomDetailUseCase {
    /// 新しい GetRoomDetailUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 参加者がいるルームの詳細を取得
    ///
    /// # Returns
    ///
    /// * `Err(GetRoomDetailError::RoomNotFound)` - 参加者がいない（または不正な ID の）ルーム
    pub async fn execute(&self, room_id: String) -> Result<RoomView, GetRoomDetailError> {
        let room_id = RoomId::new(room_id).map_err(|_| GetRoomDetailError::RoomNotFound)?;
        let members = self.registry.members(&room_id).await;
        if members.is_empty() {
            return Err(GetRoomDetailError::RoomNotFound);
        }
        Ok(RoomView::new(room_id, members))
    }
}
