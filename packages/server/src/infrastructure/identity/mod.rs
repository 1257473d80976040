//! Identity Resolver の実装

pub mod static_token;

pub use static_token::{StaticTokenResolver, TokenConfigError, parse_token_entry};
