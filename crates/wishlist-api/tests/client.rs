// Contract tests against a mocked wishlist backend
use serde_json::json;
use wishlist_api::{
    build_request, DownloadedFilter, FilterState, ItemDraft, ItemId, ItemPatch, ListRequest,
    WishlistClient, WishlistError,
};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client_for(server: &MockServer) -> WishlistClient {
    WishlistClient::with_base_url(&format!("{}/api", server.uri())).unwrap()
}

fn sample_items() -> serde_json::Value {
    json!([
        {"id": 1, "name": "Desk lamp", "description": "warm light", "url": null, "category": "Home", "downloaded": false},
        {"id": 2, "name": "Rust book", "category": "Books", "downloaded": true}
    ])
}

#[tokio::test]
async fn list_all_hits_plain_endpoint_without_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wishlist/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_items()))
        .expect(1)
        .mount(&server)
        .await;

    let items = client_for(&server).list(&ListRequest::All).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, ItemId(1));
    assert_eq!(items[1].category.as_deref(), Some("Books"));

    let received = server.received_requests().await.unwrap();
    assert_eq!(received[0].url.query(), None);
}

#[tokio::test]
async fn search_sends_only_constrained_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wishlist/search/"))
        .and(query_param("query", "lamp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let filters = FilterState {
        search_term: "lamp".to_string(),
        ..FilterState::default()
    };
    let items = client_for(&server)
        .list(&build_request(&filters))
        .await
        .unwrap();
    assert!(items.is_empty());

    let received: Vec<Request> = server.received_requests().await.unwrap();
    let keys: Vec<String> = received[0]
        .url
        .query_pairs()
        .map(|(k, _)| k.into_owned())
        .collect();
    assert_eq!(keys, vec!["query".to_string()]);
}

#[tokio::test]
async fn search_sends_explicit_false_for_not_downloaded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wishlist/search/"))
        .and(query_param("downloaded", "false"))
        .and(query_param("category", "Books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let filters = FilterState {
        search_term: String::new(),
        category: "Books".to_string(),
        downloaded: DownloadedFilter::NotDownloaded,
    };
    client_for(&server)
        .list(&filters.to_request())
        .await
        .unwrap();
}

#[tokio::test]
async fn create_posts_draft_and_ignores_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/wishlist/"))
        .and(body_json(json!({"name": "Foo", "category": "Books", "downloaded": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 99, "name": "Foo", "category": "Books", "downloaded": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let draft = ItemDraft::new("Foo").category("Books");
    client_for(&server).create(&draft).await.unwrap();
}

#[tokio::test]
async fn patch_sends_only_downloaded_field() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/wishlist/5"))
        .and(body_json(json!({"downloaded": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5, "name": "Lamp", "downloaded": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .update(ItemId(5), &ItemPatch::downloaded(true))
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_missing_item_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/wishlist/404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Item not found"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).delete(ItemId(404)).await.unwrap_err();
    assert!(matches!(err, WishlistError::NotFound(ItemId(404))));
}

#[tokio::test]
async fn server_error_is_request_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wishlist/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list(&ListRequest::All)
        .await
        .unwrap_err();
    match err {
        WishlistError::RequestFailed { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wishlist/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list(&ListRequest::All)
        .await
        .unwrap_err();
    assert!(matches!(err, WishlistError::ParseError(_)));
}

#[tokio::test]
async fn connection_refused_is_network_error() {
    // Nothing listens on port 9 locally
    let client = WishlistClient::with_base_url("http://127.0.0.1:9/api").unwrap();
    let err = client.list(&ListRequest::All).await.unwrap_err();
    assert!(matches!(err, WishlistError::NetworkError(_)));
}

#[tokio::test]
async fn get_and_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wishlist/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "name": "Headphones", "downloaded": false
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let item = client.get(ItemId(3)).await.unwrap();
    assert_eq!(item.name, "Headphones");
    assert!(client.health().await.unwrap());
}
