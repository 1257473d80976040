//! InMemory 実装

pub mod message_store;
pub mod room_registry;

pub use message_store::InMemoryMessageStore;
pub use room_registry::InMemoryRoomRegistry;
