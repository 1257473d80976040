//! WebSocket chat server implementation.

mod handler;
mod server;
mod signal;
pub mod state;

pub use handler::websocket::bearer_credential;
pub use server::{Server, ServerConfig};
pub use state::AppState;
