//! Room chat fan-out server.
//!
//! Relays every text frame received on `/chat/room/{room_id}/` to all sessions
//! joined to that room and appends it to the message store.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server -- --token secret-a=alice --token secret-b=bob
//! cargo run --bin hiroba-server -- --port 3000 --store-file messages.jsonl --token secret-a=alice
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use hiroba_server::{
    domain::{MessageStore, RoomRegistry},
    infrastructure::{
        identity::StaticTokenResolver,
        repository::{InMemoryMessageStore, InMemoryRoomRegistry, JsonLinesMessageStore},
    },
    ui::{AppState, Server, ServerConfig, state::DEFAULT_MAX_MESSAGE_SIZE},
};
use hiroba_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "WebSocket room chat server with broadcast support", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Accepted bearer token, as TOKEN=USERNAME (repeatable)
    #[arg(short = 't', long = "token", value_name = "TOKEN=USERNAME")]
    tokens: Vec<String>,

    /// Append messages to this JSON Lines file instead of keeping them in memory
    #[arg(long, value_name = "PATH")]
    store_file: Option<PathBuf>,

    /// Maximum size of one inbound WebSocket message, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_MESSAGE_SIZE)]
    max_message_size: usize,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_BIN_NAME"),
        &args.log_level,
    );

    // Initialize dependencies in order:
    // 1. Identity Resolver
    // 2. Message Store
    // 3. Room Registry
    // 4. AppState (MessagePusher + UseCases)
    // 5. Server

    // 1. Create Identity Resolver (static token table)
    let resolver = match StaticTokenResolver::from_entries(&args.tokens) {
        Ok(resolver) => resolver,
        Err(e) => {
            tracing::error!("Invalid --token argument: {}", e);
            std::process::exit(1);
        }
    };
    if resolver.is_empty() {
        tracing::warn!("No --token given: every connection will be rejected as unauthorized");
    } else {
        tracing::info!("{} bearer token(s) configured", resolver.len());
    }

    // 2. Create Message Store
    let message_store: Arc<dyn MessageStore> = match &args.store_file {
        Some(path) => match JsonLinesMessageStore::open(path).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!("Failed to open message store {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            tracing::info!("Using in-memory message store");
            Arc::new(InMemoryMessageStore::new())
        }
    };

    // 3. Create Room Registry (in-memory)
    let registry: Arc<dyn RoomRegistry> = Arc::new(InMemoryRoomRegistry::new());

    // 4. Wire use cases
    let state = AppState::wire(
        registry,
        Arc::new(resolver),
        message_store,
        Arc::new(SystemClock),
    )
    .with_max_message_size(args.max_message_size);

    // 5. Create and run the server
    let config = ServerConfig {
        host: args.host,
        port: args.port,
    };
    if let Err(e) = Server::new(state).run(&config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
