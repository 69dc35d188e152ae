//! HTTP-level tests for the Trello client against a mock server.

use serde_json::json;
use trello::{NewCard, TrelloClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> TrelloClient {
    TrelloClient::with_base_url("test-key", "test-token", &server.uri()).unwrap()
}

#[tokio::test]
async fn resolve_prefers_explicit_board_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/boards/abc123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "abc123", "name": "Board" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let id = client
        .resolve_board_id(Some("abc123"), Some("unused"), "Sprint Board")
        .await
        .unwrap();
    assert_eq!(id, "abc123");
}

#[tokio::test]
async fn resolve_falls_through_failed_id_to_short_link() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/boards/stale-id"))
        .respond_with(ResponseTemplate::new(404).set_body_string("board not found"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/boards/m47dQixP"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": "real-id", "name": "Sprint Board" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let id = client
        .resolve_board_id(Some("stale-id"), Some("m47dQixP"), "Sprint Board")
        .await
        .unwrap();
    assert_eq!(id, "real-id");
}

#[tokio::test]
async fn resolve_falls_back_to_name_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/members/me/boards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "b1", "name": "Other Board" },
            { "id": "b2", "name": "ReThread Sprint Board" },
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let id = client
        .resolve_board_id(None, None, "ReThread Sprint Board")
        .await
        .unwrap();
    assert_eq!(id, "b2");
}

#[tokio::test]
async fn resolve_reports_board_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/members/me/boards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .resolve_board_id(None, None, "Missing Board")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Board not found"));
}

#[tokio::test]
async fn create_card_sends_due_and_labels() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cards"))
        .and(query_param("key", "test-key"))
        .and(query_param("token", "test-token"))
        .and(query_param("idList", "list-1"))
        .and(query_param("due", "2026-02-05T12:00:00.000Z"))
        .and(query_param("idLabels", "l1,l2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c1",
            "name": "Task",
            "idList": "list-1",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let card = client
        .create_card(
            &NewCard::new("list-1", "Task", "desc")
                .due("2026-02-05T12:00:00.000Z")
                .labels(vec!["l1".to_string(), "l2".to_string()]),
        )
        .await
        .unwrap();
    assert_eq!(card.id, "c1");
}

#[tokio::test]
async fn error_status_surfaces_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/boards/b1/lists"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid pos"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.create_list("b1", "Backlog", "1").await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("400"));
    assert!(message.contains("invalid pos"));
}
