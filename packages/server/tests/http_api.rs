//! HTTP API integration tests.
//!
//! Tests for REST API endpoints (health check, room list, room details, history).

mod fixtures;

use fixtures::{TestServer, next_text};
use futures_util::SinkExt;
use tokio_tungstenite::tungstenite::Message;

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /api/health エンドポイントが正常に動作する
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/health", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_rooms_list_endpoint() {
    // テスト項目: /api/rooms が参加者のいるルームだけを返す
    // given (前提条件):
    let server = TestServer::start().await;
    let _a = server.join("r1", "token-a").await;
    let _b = server.join("r1", "token-b").await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/rooms", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let rooms = body.as_array().expect("Response should be an array");
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["id"], "r1");
    assert_eq!(rooms[0]["participants"], serde_json::json!(["A", "B"]));
}

#[tokio::test]
async fn test_room_detail_endpoint() {
    // テスト項目: /api/rooms/{room_id} が参加者の詳細を返し、いないルームは 404
    // given (前提条件):
    let server = TestServer::start().await;
    let _a = server.join("r1", "token-a").await;
    let client = reqwest::Client::new();

    // when (操作):
    let found = client
        .get(format!("{}/api/rooms/r1", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");
    let missing = client
        .get(format!("{}/api/rooms/nonexistent", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(found.status(), 200);
    let body: serde_json::Value = found.json().await.expect("Failed to parse JSON");
    assert_eq!(body["id"], "r1");
    let participants = body["participants"].as_array().unwrap();
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0]["username"], "A");
    assert!(participants[0]["session_id"].is_string());
    assert!(
        participants[0]["joined_at"]
            .as_str()
            .unwrap()
            .ends_with("+09:00")
    );
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
async fn test_room_messages_endpoint() {
    // テスト項目: /api/rooms/{room_id}/messages が保存済みの履歴を古い順に返す
    // given (前提条件):
    let server = TestServer::start().await;
    let mut a = server.join("r1", "token-a").await;
    for text in ["first", "second", "third"] {
        a.send(Message::Text(text.into())).await.unwrap();
        next_text(&mut a).await;
    }
    server.wait_for_stored(3).await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/rooms/r1/messages?limit=2", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let messages = body.as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["message"], "second");
    assert_eq!(messages[1]["message"], "third");
    assert_eq!(messages[1]["username"], "A");
    assert_eq!(messages[1]["room_id"], "r1");
}
