//! Domain layer for the chat fan-out server.
//!
//! This module contains business logic that is independent of
//! transport and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod identity;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, DEPARTURE_NOTICE, RoomMember, Session, SessionStatus};
pub use error::{AuthError, RegistryError, SessionError, StoreError, ValueObjectError};
pub use factory::SessionIdFactory;
pub use identity::IdentityResolver;
pub use message_pusher::{
    BroadcastReport, MessagePusher, OUTBOUND_QUEUE_CAPACITY, PusherChannel, PusherReceiver,
    pusher_channel,
};
pub use repository::{MessageStore, RoomRegistry};
pub use value_object::{Identity, RoomId, SessionId, Timestamp};

#[cfg(test)]
pub use identity::MockIdentityResolver;
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
#[cfg(test)]
pub use repository::MockMessageStore;
