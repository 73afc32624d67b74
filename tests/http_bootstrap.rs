use listing_bootstrap::api::ClientOptions;
use listing_bootstrap::bootstrap::{refresh_favorites, sign_out, BootstrapStage};
use listing_bootstrap::storage::{JsonFileStore, KeyValueStore, MemoryStore, ACCESS_TOKEN_KEY};
use listing_bootstrap::{
    AppState, BootstrapPipeline, BootstrapResult, FavoriteEntry, ListingApi, ListingClient,
};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ListingClient {
    ListingClient::with_options(ClientOptions {
        base_url: format!("{}/api", server.uri()),
        timeout: Duration::from_secs(5),
        ..ClientOptions::default()
    })
    .unwrap()
}

fn listings() -> serde_json::Value {
    json!([
        {
            "id": 1, "title": "Family house", "price": "450000.00", "is_verified": true,
            "type": "house", "property_type": "sale",
            "number_of_bedrooms": 4, "number_of_bathrooms": 2,
            "images": [{"images": "https://cdn.example.com/1.jpg"}]
        },
        {
            "id": 2, "title": "Unchecked villa", "price": 900000, "is_verified": false,
            "type": "villa", "property_type": "sale", "images": []
        },
        {
            "id": 3, "title": "City apartment", "price": 1800, "is_verified": true,
            "type": "apartment", "property_type": "rent", "images": []
        }
    ])
}

async fn mount_listings(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/main/properties/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listings()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn client_sends_bearer_token_for_identity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/core/user/me/"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "alice",
            "email": "alice@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let profile = client_for(&server).fetch_current_user("abc123").await.unwrap();
    assert_eq!(profile.username, "alice");
}

#[tokio::test]
async fn client_turns_server_error_into_err() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/main/properties/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(client_for(&server).fetch_properties().await.is_err());
}

#[tokio::test]
async fn signed_in_bootstrap_over_http() {
    let server = MockServer::start().await;
    mount_listings(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/core/user/me/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "username": "alice" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/main/properties/1/favorites/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": 77, "user": 5 }])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/main/properties/3/favorites/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::with_entry(ACCESS_TOKEN_KEY, "abc123"));
    let state = AppState::new();

    let report = BootstrapPipeline::new(Arc::new(client_for(&server)), store)
        .run(&state)
        .await;

    assert!(!report.fell_back);
    let result = state.snapshot().unwrap();
    assert_eq!(result.username, "alice");
    assert_eq!(
        result.properties.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![1, 3]
    );
    assert_eq!(result.properties[0].price, Some(450000.0));
    let tabs: HashSet<&str> = result.type_tabs.iter().map(String::as_str).collect();
    assert_eq!(tabs, HashSet::from(["house", "sale", "apartment", "rent"]));
    assert_eq!(result.favorites_map.len(), 2);
    assert_eq!(
        result.favorites_map[&1],
        FavoriteEntry {
            liked: true,
            fav_id: Some("77".to_string()),
        }
    );
    assert_eq!(result.favorites_map[&3], FavoriteEntry::default());
    assert_eq!(report.stages.last(), Some(&BootstrapStage::Complete));
}

#[tokio::test]
async fn unreachable_listings_fall_back_to_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/main/properties/"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let state = AppState::new();
    let api = Arc::new(client_for(&server));
    let report = BootstrapPipeline::new(api, Arc::new(MemoryStore::new()))
        .run(&state)
        .await;

    assert!(report.fell_back);
    assert_eq!(*state.snapshot().unwrap(), BootstrapResult::empty());
}

#[tokio::test]
async fn session_file_drives_refresh_and_sign_out() {
    let server = MockServer::start().await;
    mount_listings(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/core/user/me/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "username": "carol" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/main/properties/3/favorites/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "fav-3" }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/main/properties/1/favorites/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session").join("store.json");
    let store = Arc::new(JsonFileStore::new(session_file));
    store.set(ACCESS_TOKEN_KEY, "file-token").await.unwrap();

    let api = Arc::new(client_for(&server));
    let state = AppState::new();
    BootstrapPipeline::new(api.clone(), store.clone())
        .run(&state)
        .await;
    assert_eq!(state.snapshot().unwrap().username, "carol");

    let timeout = Duration::from_secs(2);
    let refreshed = refresh_favorites(api.as_ref(), store.as_ref(), &state, timeout)
        .await
        .unwrap();
    assert!(refreshed);
    assert_eq!(
        state.snapshot().unwrap().favorites_map[&3].fav_id.as_deref(),
        Some("fav-3")
    );

    sign_out(store.as_ref(), &state).await.unwrap();
    let reopened = JsonFileStore::new(store.path());
    assert_eq!(reopened.get(ACCESS_TOKEN_KEY).await.unwrap(), None);
    let after = state.snapshot().unwrap();
    assert!(after.favorites_map.is_empty());
    assert_eq!(after.properties.len(), 2);
}

#[tokio::test]
async fn file_store_persists_and_tolerates_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");

    let store = JsonFileStore::new(&file);
    assert_eq!(store.get(ACCESS_TOKEN_KEY).await.unwrap(), None);
    store.remove(ACCESS_TOKEN_KEY).await.unwrap();

    store.set(ACCESS_TOKEN_KEY, "persisted").await.unwrap();
    store.set("theme", "dark").await.unwrap();

    let reopened = JsonFileStore::new(&file);
    assert_eq!(
        reopened.get(ACCESS_TOKEN_KEY).await.unwrap().as_deref(),
        Some("persisted")
    );
    assert_eq!(reopened.get("theme").await.unwrap().as_deref(), Some("dark"));
}
