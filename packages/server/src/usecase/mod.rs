//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod authenticate;
pub mod error;
pub mod get_room_detail;
pub mod get_room_history;
pub mod get_rooms;
pub mod join_room;
pub mod leave_room;
pub mod send_message;

pub use authenticate::AuthenticateUseCase;
pub use error::{
    AuthenticateError, GetRoomDetailError, GetRoomHistoryError, JoinRoomError, SendMessageError,
};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_room_history::GetRoomHistoryUseCase;
pub use get_rooms::{GetRoomsUseCase, RoomView};
pub use join_room::JoinRoomUseCase;
pub use leave_room::{LeaveOutcome, LeaveRoomUseCase};
pub use send_message::{SendMessageUseCase, SendOutcome};
