//! Integration tests for ApiClient using wiremock.
//!
//! These tests verify request shapes and error mapping against a mock HTTP server.

use std::time::Duration;

use tasktrack_core::NetworkError;
use tasktrack_services::{
    ApiClient, GroupCreateRequest, GroupUpdateRequest, TodoCreateRequest, TodoQuery,
};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a test todo
fn test_todo(id: &str, heading: &str, group_id: &str, complete: bool) -> serde_json::Value {
    let completed = if complete {
        serde_json::json!("2026-01-31T12:00:00Z")
    } else {
        serde_json::Value::Null
    };
    serde_json::json!({
        "id": id,
        "heading": heading,
        "body": "",
        "isComplete": complete,
        "isStarred": false,
        "groupId": group_id,
        "createdDate": "2026-01-30T12:00:00Z",
        "completedDate": completed
    })
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_list_todos_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            test_todo("1", "First", "g1", false),
            test_todo("2", "Second", "g2", true),
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let todos = client.list_todos(&TodoQuery::all()).await.unwrap();

    assert_eq!(todos.len(), 2);
    assert_eq!(todos[0].id, "1");
    assert_eq!(todos[0].heading, "First");
    assert!(!todos[0].is_complete);
    assert!(todos[1].is_complete);
    assert!(todos[1].completed_date.is_some());
}

#[tokio::test]
async fn test_list_completed_todos_sends_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("isComplete", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            test_todo("2", "Second", "g2", true),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let todos = client.list_todos(&TodoQuery::completed()).await.unwrap();

    assert_eq!(todos.len(), 1);
    assert!(todos[0].is_complete);
}

#[tokio::test]
async fn test_json_headers_included() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/groups"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let groups = client.list_groups().await.unwrap();

    // If the header wasn't present, the mock wouldn't match and we'd get a 404
    assert!(groups.is_empty());
}

#[tokio::test]
async fn test_create_todo_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/items"))
        .and(body_partial_json(serde_json::json!({
            "heading": "New todo",
            "groupId": "g1",
            "isComplete": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(test_todo(
            "server-id",
            "New todo",
            "g1",
            false,
        )))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let todo = client
        .create_todo(&TodoCreateRequest::new("New todo", "", "g1"))
        .await
        .unwrap();

    assert_eq!(todo.id, "server-id");
    assert_eq!(todo.heading, "New todo");
}

#[tokio::test]
async fn test_update_todo_patches_full_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/items/abc123"))
        .and(body_partial_json(serde_json::json!({
            "id": "abc123",
            "heading": "Edited",
            "isComplete": true,
            "groupId": "g1"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(test_todo("abc123", "Edited", "g1", true)),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut todo: tasktrack_services::Todo =
        serde_json::from_value(test_todo("abc123", "Original", "g1", false)).unwrap();
    todo.heading = "Edited".to_string();
    todo.is_complete = true;

    let updated = client.update_todo(&todo).await.unwrap();
    assert_eq!(updated.heading, "Edited");
    assert!(updated.is_complete);
}

#[tokio::test]
async fn test_delete_todo_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/items/abc123"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(client.delete_todo("abc123").await.is_ok());
}

#[tokio::test]
async fn test_delete_missing_todo_is_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/items/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.delete_todo("gone").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("Not Found"), "unexpected error: {}", err);
}

#[tokio::test]
async fn test_no_retry_on_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/groups"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1) // Called exactly once: failures are never retried
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.list_groups().await.unwrap_err();

    assert!(matches!(err, NetworkError::ServerError { status: 503, .. }));
}

#[tokio::test]
async fn test_timeout_maps_to_timeout_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/groups"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), Duration::from_millis(50)).unwrap();
    let err = client.list_groups().await.unwrap_err();

    assert!(matches!(err, NetworkError::Timeout), "unexpected error: {:?}", err);
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.list_todos(&TodoQuery::all()).await.unwrap_err();

    assert!(matches!(err, NetworkError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_group_crud_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/groups"))
        .and(body_partial_json(serde_json::json!({ "name": "Work" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "g9", "name": "Work"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/groups/g9"))
        .and(body_partial_json(serde_json::json!({ "name": "Office" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "g9", "name": "Office"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/groups/g9"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let created = client.create_group(&GroupCreateRequest::new("Work")).await.unwrap();
    assert_eq!(created.id, "g9");

    let renamed = client
        .update_group(
            "g9",
            &GroupUpdateRequest {
                name: "Office".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Office");

    assert!(client.delete_group("g9").await.is_ok());
}
