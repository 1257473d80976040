//! メッセージ送信（通知）の実装
//!
//! ## 概要
//!
//! このモジュールは `MessagePusher` trait の具体的な実装を提供します。
//!
//! ## 実装
//!
//! - `websocket`: プロセス内の WebSocket セッションへのファンアウト
//! - 将来的に: `redis` などの分散 pub/sub

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
