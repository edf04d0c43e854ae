//! End-to-end cache-aside behavior through the client.

use enka_client::{Client, Error, MemoryBackend, SqliteBackend};
use std::time::Duration;

const MINIMAL_BODY: &str = r#"{"playerInfo": {"nickname": "seria", "level": 60}, "uid": "901211014"}"#;

#[tokio::test]
async fn second_fetch_within_ttl_hits_the_cache() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/uid/901211014")
        .with_status(200)
        .with_body(MINIMAL_BODY)
        .expect(1)
        .create_async()
        .await;

    let client = Client::builder()
        .cache(MemoryBackend::new())
        .base_url_override(server.url())
        .build()
        .unwrap();

    let first = client.fetch_showcase("901211014").await.unwrap();
    let second = client.fetch_showcase("901211014").await.unwrap();
    assert_eq!(first.player.nickname, second.player.nickname);

    // Exactly one upstream request.
    mock.assert_async().await;
    let stats = client.cache_stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[tokio::test]
async fn fetch_after_ttl_expiry_goes_upstream_again() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/uid/901211014")
        .with_status(200)
        .with_body(MINIMAL_BODY)
        .expect(2)
        .create_async()
        .await;

    let client = Client::builder()
        .cache(MemoryBackend::new())
        .ttl(Duration::from_millis(30))
        .base_url_override(server.url())
        .build()
        .unwrap();

    client.fetch_showcase("901211014").await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    client.fetch_showcase("901211014").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn upstream_error_propagates_and_is_not_cached() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/uid/123456789")
        .with_status(404)
        .expect(2)
        .create_async()
        .await;

    let client = Client::builder()
        .cache(MemoryBackend::new())
        .base_url_override(server.url())
        .build()
        .unwrap();

    // Both calls reach upstream: the failure was never stored.
    for _ in 0..2 {
        let err = client.fetch_showcase("123456789").await.unwrap_err();
        assert!(matches!(err, Error::PlayerDoesNotExist));
    }
    mock.assert_async().await;
    assert_eq!(client.cache_stats().sets, 0);
}

#[tokio::test]
async fn retcodes_map_to_domain_errors() {
    let cases = [
        (424, "game maintenance"),
        (429, "rate limited"),
        (500, "general server error"),
        (503, "server library error"),
    ];

    for (status, label) in cases {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/uid/901211014")
            .with_status(status)
            .create_async()
            .await;

        let client = Client::builder()
            .cache(MemoryBackend::new())
            .base_url_override(server.url())
            .build()
            .unwrap();

        let err = client.fetch_showcase("901211014").await.unwrap_err();
        let matched = matches!(
            (status, &err),
            (424, Error::GameMaintenance)
                | (429, Error::RateLimited)
                | (500, Error::GeneralServerError)
                | (503, Error::ServerLibraryError)
        );
        assert!(matched, "{label}: unexpected error {err:?}");
    }
}

#[tokio::test]
async fn malformed_uid_fails_before_any_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = Client::builder()
        .cache(MemoryBackend::new())
        .base_url_override(server.url())
        .build()
        .unwrap();

    let err = client.fetch_showcase("not-a-uid").await.unwrap_err();
    assert!(matches!(err, Error::WrongUidFormat));
    mock.assert_async().await;
}

#[tokio::test]
async fn player_info_variant_is_cached_separately() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/uid/901211014")
        .with_status(200)
        .with_body(MINIMAL_BODY)
        .expect(2)
        .create_async()
        .await;

    let client = Client::builder()
        .cache(MemoryBackend::new())
        .base_url_override(server.url())
        .build()
        .unwrap();

    // Same uid, different payload variant: two distinct cache entries, so
    // exactly one upstream request each.
    client.fetch_showcase("901211014").await.unwrap();
    client.fetch_player("901211014").await.unwrap();
    client.fetch_showcase("901211014").await.unwrap();
    client.fetch_player("901211014").await.unwrap();

    mock.assert_async().await;
    let stats = client.cache_stats();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 2);
}

#[tokio::test]
async fn invalidation_forces_a_refetch() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/uid/901211014")
        .with_status(200)
        .with_body(MINIMAL_BODY)
        .expect(2)
        .create_async()
        .await;

    let client = Client::builder()
        .cache(MemoryBackend::new())
        .base_url_override(server.url())
        .build()
        .unwrap();

    client.fetch_showcase("901211014").await.unwrap();
    client.invalidate_showcase("901211014").await.unwrap();
    client.fetch_showcase("901211014").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn sqlite_cache_survives_a_client_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("cache.db");

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/uid/901211014")
        .with_status(200)
        .with_body(MINIMAL_BODY)
        .expect(1)
        .create_async()
        .await;

    let build = |backend| {
        Client::builder()
            .cache(backend)
            .ttl(Duration::from_secs(600))
            .base_url_override(server.url())
            .build()
            .unwrap()
    };

    let client = build(SqliteBackend::open(&db_path).await.unwrap());
    client.fetch_showcase("901211014").await.unwrap();
    client.close().await.unwrap();

    // A fresh client over the same file is served entirely from disk.
    let client = build(SqliteBackend::open(&db_path).await.unwrap());
    let showcase = client.fetch_showcase("901211014").await.unwrap();
    assert_eq!(showcase.player.nickname.as_deref(), Some("seria"));
    client.close().await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn close_is_idempotent_through_the_client() {
    let client = Client::builder().cache(MemoryBackend::new()).build().unwrap();
    client.close().await.unwrap();
    client.close().await.unwrap();
}

#[tokio::test]
async fn concurrent_fetches_share_one_client() {
    use std::sync::Arc;

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", mockito::Matcher::Regex(r"^/api/uid/\d+$".to_string()))
        .with_status(200)
        .with_body(MINIMAL_BODY)
        .create_async()
        .await;

    let client = Arc::new(
        Client::builder()
            .cache(MemoryBackend::new())
            .base_url_override(server.url())
            .build()
            .unwrap(),
    );

    let mut tasks = Vec::new();
    for i in 0..8 {
        let client = Arc::clone(&client);
        tasks.push(tokio::spawn(async move {
            let uid = format!("90121101{i}");
            client.fetch_showcase(&uid).await.unwrap()
        }));
    }
    for t in tasks {
        t.await.unwrap();
    }

    let stats = client.cache_stats();
    assert_eq!(stats.hits + stats.misses, 8);
}
