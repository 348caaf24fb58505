// Integration tests for Follow Overlap

use follow_overlap::core::Comparer;
use follow_overlap::models::{CombinePolicy, CompareRequest, SetKey};
use follow_overlap::services::{BackendClient, BackendError, NetworkCache, SearchClient, SearchError};
use mockito::Matcher;
use std::time::Duration;

const ALICE: &str = r#"{
    "follows": [
        {"handle": "carol.test", "displayName": "Carol"},
        {"handle": "dave.test"},
        {"handle": "handle.invalid"}
    ],
    "followers": [
        {"handle": "dave.test", "displayName": "Dave"},
        {"handle": "erin.test"}
    ],
    "fromCache": false,
    "cached": true
}"#;

const BOB: &str = r#"{
    "follows": [
        {"handle": "carol.test", "displayName": "Carol C."},
        {"handle": "frank.test"}
    ],
    "followers": [
        {"handle": "dave.test"},
        {"handle": "handle.invalid"}
    ],
    "fromCache": true,
    "cached": true,
    "cacheHits": 3
}"#;

fn backend(server: &mockito::ServerGuard) -> BackendClient {
    BackendClient::new(format!("{}/", server.url()), Duration::from_secs(5)).unwrap()
}

async fn mock_actor(server: &mut mockito::ServerGuard, handle: &str, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/")
        .match_query(Matcher::UrlEncoded("actor".into(), handle.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn test_fetch_network() {
    let mut server = mockito::Server::new_async().await;
    let mock = mock_actor(&mut server, "alice.test", ALICE).await;

    let network = backend(&server).fetch_network("alice.test").await.unwrap();

    assert_eq!(network.following.size(), 3);
    assert_eq!(network.followers.size(), 2);
    assert!(network.following.has("carol.test"));
    // Followers are recorded after follows
    assert_eq!(network.accounts["dave.test"].display_name.as_deref(), Some("Dave"));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_network_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let result = backend(&server).fetch_network("alice.test").await;
    assert!(matches!(result, Err(BackendError::ApiError(_))));
}

#[tokio::test]
async fn test_fetch_network_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let result = backend(&server).fetch_network("ghost.test").await;
    assert!(matches!(result, Err(BackendError::NotFound(_))));
}

#[tokio::test]
async fn test_fetch_network_invalid_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let result = backend(&server).fetch_network("alice.test").await;
    assert!(matches!(result, Err(BackendError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_cache_fetches_once() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::UrlEncoded("actor".into(), "alice.test".into()))
        .with_status(200)
        .with_body(ALICE)
        .expect(1)
        .create_async()
        .await;

    let client = backend(&server);
    let cache = NetworkCache::new(10, 60, 60);

    let first = cache.get_or_fetch("alice.test", &client).await.unwrap();
    let second = cache.get_or_fetch("alice.test", &client).await.unwrap();

    assert_eq!(first.following, second.following);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_cache_coalesces_concurrent_misses() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(ALICE)
        .expect(1)
        .create_async()
        .await;

    let client = backend(&server);
    let cache = NetworkCache::new(10, 60, 60);

    // Both spellings normalise to the same cache key
    let (first, second) = tokio::join!(
        cache.get_or_fetch("alice.test", &client),
        cache.get_or_fetch("Alice.test", &client),
    );
    let (first, second) = (first.unwrap(), second.unwrap());

    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(first.following.size(), 3);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_cache_does_not_keep_errors() {
    let mut server = mockito::Server::new_async().await;
    let missing = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(404)
        .expect(2)
        .create_async()
        .await;

    let client = backend(&server);
    let cache = NetworkCache::new(10, 60, 60);

    let first = cache.get_or_fetch("ghost.test", &client).await;
    assert!(matches!(*first.unwrap_err(), BackendError::NotFound(_)));

    let second = cache.get_or_fetch("ghost.test", &client).await;
    assert!(matches!(*second.unwrap_err(), BackendError::NotFound(_)));

    missing.assert_async().await;
}

#[tokio::test]
async fn test_search_cache_coalesces_concurrent_misses() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/xrpc/app.bsky.actor.searchActorsTypeahead")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"actors": [{"did": "did:plc:alice", "handle": "alice.test"}]}"#)
        .expect(1)
        .create_async()
        .await;

    let client = SearchClient::new(server.url(), 10, 2, Duration::from_secs(5)).unwrap();
    let cache = NetworkCache::new(10, 60, 60);

    let (first, second) = tokio::join!(
        cache.search_or_fetch("ali", &client),
        cache.search_or_fetch("ali", &client),
    );

    assert_eq!(first.unwrap().len(), 1);
    assert_eq!(second.unwrap().len(), 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_actors() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/xrpc/app.bsky.actor.searchActorsTypeahead")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "ali".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"actors": [{"did": "did:plc:alice", "handle": "alice.test", "displayName": "Alice"}]}"#)
        .create_async()
        .await;

    let client = SearchClient::new(server.url(), 10, 2, Duration::from_secs(5)).unwrap();
    let actors = client.search_actors("ali").await.unwrap();

    assert_eq!(actors.len(), 1);
    assert_eq!(actors[0].handle, "alice.test");
    assert_eq!(actors[0].display_name.as_deref(), Some("Alice"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_actors_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/xrpc/app.bsky.actor.searchActorsTypeahead")
        .match_query(Matcher::Any)
        .with_status(502)
        .create_async()
        .await;

    let client = SearchClient::new(server.url(), 10, 2, Duration::from_secs(5)).unwrap();
    let result = client.search_actors("alice").await;
    assert!(matches!(result, Err(SearchError::ApiError(_))));
}

#[tokio::test]
async fn test_end_to_end_comparison() {
    let mut server = mockito::Server::new_async().await;
    let _alice = mock_actor(&mut server, "alice.test", ALICE).await;
    let _bob = mock_actor(&mut server, "bob.test", BOB).await;

    let client = backend(&server);
    let cache = NetworkCache::new(10, 60, 60);

    let request = CompareRequest::from_query(
        "a=alice.test&b=bob.test&aFilters=following&bFilters=following&selectedSets=user1-followers,user2-followers",
    );

    let (alice, bob) = tokio::join!(
        cache.get_or_fetch(&request.a, &client),
        cache.get_or_fetch(&request.b, &client),
    );
    let (alice, bob) = (alice.unwrap(), bob.unwrap());

    let report = Comparer::new(CombinePolicy::Intersection)
        .compare(&alice, &bob, &request.selection(), &request.set_keys())
        .into_report(&request.a, &request.b);

    // alice: {carol, dave, invalid, erin}, bob: {carol, frank, dave, invalid}
    assert_eq!(report.similarity_score, 60);
    assert_eq!(report.similarity_message, "Practically soulmates");

    // Both follow carol; the sentinel is dropped
    assert_eq!(report.filtered_accounts.len(), 1);
    assert_eq!(report.filtered_accounts[0].handle, "carol.test");
    assert_eq!(report.filtered_accounts[0].display_name.as_deref(), Some("Carol C."));

    // dave follows both
    assert_eq!(report.selected_set_accounts.len(), 1);
    assert_eq!(report.selected_set_accounts[0].handle, "dave.test");

    assert_eq!(report.stats.mutual, 1);
    assert!(report
        .venn
        .iter()
        .any(|r| r.sets == vec![SetKey::User1Followers, SetKey::User2Followers] && r.size == 1));
}
