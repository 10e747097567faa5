//! `MemoClient` against a real server bound to an ephemeral port.

use memo_api::api::create_router_with_security;
use memo_api::client::{ClientError, MemoClient};
use memo_api::config::SecurityConfig;
use memo_api::db::Database;
use memo_api::models::*;

async fn spawn_server(security: SecurityConfig) -> String {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    let app = create_router_with_security(db, security);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    format!("http://{}/api", addr)
}

#[tokio::test]
async fn full_crud_round_trip() {
    let base_url = spawn_server(SecurityConfig::disabled()).await;
    let client = MemoClient::new(base_url, None);

    let created = client
        .create_memo(&MemoRequest::new("robbie", "hello"))
        .await
        .expect("Create failed");
    assert_eq!(created.contents, "hello");

    let listed = client.list_memos().await.expect("List failed");
    assert_eq!(listed, vec![created.clone()]);

    let updated_id = client
        .update_memo(created.id, &MemoRequest::new("robbie", "edited"))
        .await
        .expect("Update failed");
    assert_eq!(updated_id, created.id);
    let fetched = client.get_memo(created.id).await.expect("Get failed");
    assert_eq!(fetched.contents, "edited");

    let deleted_id = client.delete_memo(created.id).await.expect("Delete failed");
    assert_eq!(deleted_id, created.id);
    assert!(client.list_memos().await.expect("List failed").is_empty());
}

#[tokio::test]
async fn missing_memo_maps_to_not_found() {
    let base_url = spawn_server(SecurityConfig::disabled()).await;
    let client = MemoClient::new(base_url, None);

    let err = client.delete_memo(404).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));

    let err = client
        .update_memo(404, &MemoRequest::new("robbie", "ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn api_key_is_sent_as_bearer_token() {
    let base_url = spawn_server(SecurityConfig::with_api_key("secret")).await;

    let anonymous = MemoClient::new(base_url.clone(), None);
    let err = anonymous.list_memos().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));

    let authorized = MemoClient::new(base_url, Some("secret".to_string()));
    assert!(authorized.list_memos().await.expect("List failed").is_empty());
    assert_eq!(
        authorized.health().await.expect("Health failed"),
        serde_json::json!({ "status": "ok" })
    );
}
