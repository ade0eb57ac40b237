#![allow(clippy::unwrap_used)]
// Integration tests for `ItemsClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use itemsync_api::{
    DeleteReceipt, Error, ItemPatchPayload, ItemPayload, ItemsClient, RecordId, TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ItemsClient) {
    let server = MockServer::start().await;
    let client = ItemsClient::new(&server.uri(), &TransportConfig::default()).unwrap();
    (server, client)
}

fn tea() -> serde_json::Value {
    json!({ "id": 1, "name": "Tea", "description": "Green", "price": 200 })
}

// ── Listing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_items() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/items/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            tea(),
            { "id": 2, "name": "Coffee", "description": "", "price": 350 }
        ])))
        .mount(&server)
        .await;

    let items = client.list_items().await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, Some(RecordId::Number(1)));
    assert_eq!(items[0].name.as_deref(), Some("Tea"));
    assert_eq!(items[1].price, Some(350));
}

#[tokio::test]
async fn test_get_item() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/items/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tea()))
        .mount(&server)
        .await;

    let item = client.get_item("1").await.unwrap();
    assert_eq!(item.description.as_deref(), Some("Green"));
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_item_posts_full_payload() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/items/"))
        .and(body_json(json!({ "name": "Tea", "description": "Green", "price": 200 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(tea()))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_item(&ItemPayload {
            name: "Tea".into(),
            description: "Green".into(),
            price: 200,
        })
        .await
        .unwrap();

    assert_eq!(created.id, Some(RecordId::Number(1)));
}

#[tokio::test]
async fn test_update_item_puts_to_item_path() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/items/1"))
        .and(body_json(json!({ "price": 250 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "id": 1, "name": "Tea", "description": "Green", "price": 250 }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let patch = ItemPatchPayload {
        price: Some(250),
        ..ItemPatchPayload::default()
    };
    let updated = client.update_item("1", &patch).await.unwrap();
    assert_eq!(updated.price, Some(250));
}

#[tokio::test]
async fn test_delete_item_acknowledgment() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/items/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Item deleted successfully" })),
        )
        .mount(&server)
        .await;

    let receipt = client.delete_item("1").await.unwrap();
    assert_eq!(
        receipt,
        DeleteReceipt::Acknowledged {
            message: "Item deleted successfully".into()
        }
    );
    assert!(receipt.id().is_none());
}

#[tokio::test]
async fn test_delete_item_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/items/9"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    assert_eq!(client.delete_item("9").await.unwrap(), DeleteReceipt::Empty);
}

#[tokio::test]
async fn test_service_info() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Welcome to the CRUD App!" })),
        )
        .mount(&server)
        .await;

    let info = client.service_info().await.unwrap();
    assert_eq!(info.as_deref(), Some("Welcome to the CRUD App!"));
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_not_found_uses_detail() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/items/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Item not found" })))
        .mount(&server)
        .await;

    let err = client
        .update_item("99", &ItemPatchPayload::default())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message.as_deref(), Some("Item not found"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_without_body_uses_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client.list_items().await.unwrap_err();
    assert!(err.is_transient());
    assert_eq!(err.status(), Some(503));
    assert!(
        matches!(err, Error::Api { message: None, .. }),
        "expected no message, got: {err:?}"
    );
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database is down"))
        .mount(&server)
        .await;

    let err = client
        .create_item(&ItemPayload {
            name: "x".into(),
            description: String::new(),
            price: 1,
        })
        .await
        .unwrap_err();

    assert!(
        matches!(err, Error::Api { status: 500, message: Some(ref m) } if m == "database is down"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn test_undecodable_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/items/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list_items().await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop a server so the port is very likely closed.
    let uri = {
        let server = MockServer::builder().start().await;
        server.uri()
    };
    let client = ItemsClient::new(&uri, &TransportConfig::default()).unwrap();

    let err = client.list_items().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
}
