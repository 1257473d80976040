//! MessagePusher trait 定義
//!
//! ルームへのメッセージ配信（ファンアウト）を抽象化します。
//! マルチインスタンス構成が必要になった場合は、この trait の実装を
//! 分散 pub/sub に差し替えるだけで Gateway と Registry はそのまま使えます。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{RoomId, SessionId};

/// セッションの送信タスクが溜められる未送信メッセージの上限
pub const OUTBOUND_QUEUE_CAPACITY: usize = 256;

/// セッションの送信タスクへメッセージを渡すチャンネル
pub type PusherChannel = mpsc::Sender<String>;

/// セッションの送信タスクが読み出す側
pub type PusherReceiver = mpsc::Receiver<String>;

/// 容量 `OUTBOUND_QUEUE_CAPACITY` の送信チャンネルを作成
///
/// 読み出しの追いつかない参加者はキューが満杯になった時点で配信失敗として扱われる。
pub fn pusher_channel() -> (PusherChannel, PusherReceiver) {
    mpsc::channel(OUTBOUND_QUEUE_CAPACITY)
}

/// 1 回のブロードキャストの結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// 配信できた参加者数
    pub delivered: usize,
    /// 配信に失敗し、ルームから外したセッション
    pub evicted: Vec<SessionId>,
}

impl BroadcastReport {
    pub fn attempted(&self) -> usize {
        self.delivered + self.evicted.len()
    }
}

/// MessagePusher trait
///
/// ## 配信の保証
///
/// - 参加者ごとの配信失敗は、その参加者をルームから外すだけで残りへの配信は続ける
/// - 同じルームへのブロードキャストは直列化され、全参加者が受理順に受け取る
/// - ルームをまたいだ順序は保証しない
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// ルームの全参加者に `content` を配信する
    async fn broadcast(&self, room_id: &RoomId, content: &str) -> BroadcastReport;
}
