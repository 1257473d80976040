//! Data Transfer Objects for the HTTP API and the message store.

pub mod http;
pub mod store;
