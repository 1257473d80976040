//! Test fixtures: an in-process server and a WebSocket client.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::StreamExt;
use hiroba_server::{
    domain::{RoomId, RoomRegistry},
    infrastructure::{
        identity::StaticTokenResolver,
        repository::{InMemoryMessageStore, InMemoryRoomRegistry},
    },
    ui::{AppState, Server},
};
use hiroba_shared::time::SystemClock;
use tokio::{net::TcpStream, sync::oneshot};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{self, Message, client::IntoClientRequest},
};

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Tokens accepted by the test server
pub const TOKENS: [&str; 3] = ["token-a=A", "token-b=B", "token-c=C"];

const TIMEOUT: Duration = Duration::from_secs(5);

/// Server running on an ephemeral port inside the test runtime
pub struct TestServer {
    pub addr: SocketAddr,
    pub registry: Arc<InMemoryRoomRegistry>,
    pub store: Arc<InMemoryMessageStore>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let registry = Arc::new(InMemoryRoomRegistry::new());
        let store = Arc::new(InMemoryMessageStore::new());
        let resolver = StaticTokenResolver::from_entries(TOKENS).expect("Invalid test tokens");
        let state = AppState::wire(
            registry.clone(),
            Arc::new(resolver),
            store.clone(),
            Arc::new(SystemClock),
        );

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        tokio::spawn(Server::new(state).serve(listener, async {
            let _ = shutdown_rx.await;
        }));

        Self {
            addr,
            registry,
            store,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self, room: &str) -> String {
        format!("ws://{}/chat/room/{}/", self.addr, room)
    }

    /// Open a WebSocket to `room`, sending `Authorization: Bearer <token>` when given
    pub async fn connect(
        &self,
        room: &str,
        token: Option<&str>,
    ) -> Result<WsClient, tungstenite::Error> {
        let mut request = self.ws_url(room).into_client_request()?;
        if let Some(token) = token {
            request.headers_mut().insert(
                "Authorization",
                format!("Bearer {}", token).parse().expect("Invalid header value"),
            );
        }
        let (stream, _response) = connect_async(request).await?;
        Ok(stream)
    }

    /// Connect and wait until the session shows up in the registry
    pub async fn join(&self, room: &str, token: &str) -> WsClient {
        let before = self.member_count(room).await;
        let client = self
            .connect(room, Some(token))
            .await
            .expect("Failed to connect");
        self.wait_for_members(room, before + 1).await;
        client
    }

    pub async fn member_count(&self, room: &str) -> usize {
        let room_id = RoomId::new(room.to_string()).expect("Invalid room id");
        self.registry.members(&room_id).await.len()
    }

    pub async fn wait_for_members(&self, room: &str, expected: usize) {
        let deadline = tokio::time::Instant::now() + TIMEOUT;
        while self.member_count(room).await != expected {
            assert!(
                tokio::time::Instant::now() < deadline,
                "Room '{}' never reached {} member(s)",
                room,
                expected
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    pub async fn wait_for_stored(&self, expected: usize) {
        let deadline = tokio::time::Instant::now() + TIMEOUT;
        while self.store.count().await != expected {
            assert!(
                tokio::time::Instant::now() < deadline,
                "Store never reached {} message(s)",
                expected
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// Read the next text frame, skipping control frames
pub async fn next_text(client: &mut WsClient) -> String {
    loop {
        let msg = tokio::time::timeout(TIMEOUT, client.next())
            .await
            .expect("Timed out waiting for a frame")
            .expect("Stream ended")
            .expect("WebSocket error");
        match msg {
            Message::Text(text) => return text.as_str().to_owned(),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("Unexpected frame: {:?}", other),
        }
    }
}
