#![allow(clippy::unwrap_used)]
// ItemStore driven through the real HTTP client against a wiremock server.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use itemsync_api::ItemsClient;
use itemsync_core::{CoreError, ItemDraft, ItemId, ItemPatch, ItemStore, StoreConfig};

async fn connect(server: &MockServer) -> ItemStore<ItemsClient> {
    let config = StoreConfig::new(Url::parse(&server.uri()).unwrap());
    ItemStore::connect(&config).unwrap()
}

#[tokio::test]
async fn test_enumerate_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Tea", "description": "Green", "price": 200}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = connect(&server).await;
    let items = store.enumerate().await.unwrap();

    assert_eq!(items.len(), 1);
    let snap = store.snapshot();
    assert_eq!(snap.items, items);
    assert_eq!(snap.items[0].description, "Green");
    assert!(!snap.busy);
    assert_eq!(snap.last_error, None);
}

#[tokio::test]
async fn test_create_update_remove_flow() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Tea", "description": "", "price": 200}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/items/"))
        .and(body_json(json!({"name": "Coffee", "description": "Dark", "price": 350})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"id": 2, "name": "Coffee", "description": "Dark", "price": 350}
        )))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/items/2"))
        .and(body_json(json!({"price": 400})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"id": 2, "name": "Coffee", "description": "Dark", "price": 400}
        )))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/items/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Item deleted successfully"})),
        )
        .mount(&server)
        .await;

    let store = connect(&server).await;
    store.enumerate().await.unwrap();
    store
        .create(ItemDraft::new("Coffee", "Dark", 350))
        .await
        .unwrap();
    store
        .update(
            ItemId::Numeric(2),
            ItemPatch {
                price: Some(400),
                ..ItemPatch::default()
            },
        )
        .await
        .unwrap();
    store.remove(ItemId::Numeric(1)).await.unwrap();

    let items = store.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, ItemId::Numeric(2));
    assert_eq!(items[0].price, 400);
    assert_eq!(store.snapshot().total_value(), 400);
}

#[tokio::test]
async fn test_not_found_detail_becomes_last_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/items/7"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Item not found"})))
        .mount(&server)
        .await;

    let store = connect(&server).await;
    let err = store
        .update(
            ItemId::Numeric(7),
            ItemPatch {
                name: Some("x".into()),
                ..ItemPatch::default()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(store.last_error().as_deref(), Some("Item not found"));
}

#[tokio::test]
async fn test_server_error_without_body_uses_default_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = connect(&server).await;
    assert!(store.enumerate().await.is_err());

    assert!(!store.is_busy());
    assert_eq!(store.last_error().as_deref(), Some("Failed to fetch items"));
}

#[tokio::test]
async fn test_create_response_without_id_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"name": "Tea", "description": "", "price": 200}
        )))
        .mount(&server)
        .await;

    let store = connect(&server).await;
    let err = store.create(ItemDraft::new("Tea", "", 200)).await.unwrap_err();

    assert!(matches!(err, CoreError::MalformedResponse { .. }), "got: {err:?}");
    assert!(store.items().is_empty());
    assert_eq!(
        store.last_error().as_deref(),
        Some("Failed to add item: malformed response (missing id)")
    );
}

#[tokio::test]
async fn test_unreachable_service_reports_network_error() {
    // Nothing listens on port 1.
    let config = StoreConfig::new(Url::parse("http://127.0.0.1:1").unwrap());
    let store = ItemStore::connect(&config).unwrap();

    let err = store.enumerate().await.unwrap_err();

    assert!(matches!(err, CoreError::ConnectionFailed { .. }), "got: {err:?}");
    assert_eq!(
        store.last_error().as_deref(),
        Some("Network error: could not reach the item service")
    );
    assert!(!store.is_busy());
}
