//! Repository 実装

pub mod inmemory;
pub mod jsonl;

pub use inmemory::{InMemoryMessageStore, InMemoryRoomRegistry};
pub use jsonl::JsonLinesMessageStore;
