//! Room chat fan-out server library.
//!
//! This library provides the room registry, broadcast engine and WebSocket
//! gateway of a chat server where every message is relayed to the members of
//! one room and persisted to a message store.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
