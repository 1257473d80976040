//! Server state and dependency wiring.

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::{
    domain::{IdentityResolver, MessagePusher, MessageStore, RoomRegistry},
    infrastructure::message_pusher::WebSocketMessagePusher,
    usecase::{
        AuthenticateUseCase, GetRoomDetailUseCase, GetRoomHistoryUseCase, GetRoomsUseCase,
        JoinRoomUseCase, LeaveRoomUseCase, SendMessageUseCase,
    },
};

/// Default maximum size of one inbound WebSocket message (64 KiB)
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Shared application state
pub struct AppState {
    /// AuthenticateUseCase（接続認証のユースケース）
    pub authenticate_usecase: Arc<AuthenticateUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// GetRoomHistoryUseCase（履歴取得のユースケース）
    pub get_room_history_usecase: Arc<GetRoomHistoryUseCase>,
    /// Maximum size of one inbound WebSocket message, in bytes
    pub max_message_size: usize,
}

impl AppState {
    /// Wire the use cases around the given collaborators.
    ///
    /// The broadcast engine is built on top of `registry`, so every use case
    /// observes the same membership.
    pub fn wire(
        registry: Arc<dyn RoomRegistry>,
        resolver: Arc<dyn IdentityResolver>,
        message_store: Arc<dyn MessageStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let message_pusher: Arc<dyn MessagePusher> =
            Arc::new(WebSocketMessagePusher::new(registry.clone()));

        Self {
            authenticate_usecase: Arc::new(AuthenticateUseCase::new(resolver, clock.clone())),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(registry.clone(), clock.clone())),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                message_pusher.clone(),
                message_store.clone(),
                clock,
            )),
            leave_room_usecase: Arc::new(LeaveRoomUseCase::new(
                registry.clone(),
                message_pusher,
            )),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(registry.clone())),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(registry)),
            get_room_history_usecase: Arc::new(GetRoomHistoryUseCase::new(message_store)),
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }

    /// Override the maximum inbound message size
    pub fn with_max_message_size(mut self, max_message_size: usize) -> Self {
        self.max_message_size = max_message_size;
        self
    }
}
