//! Integration tests for the PokeAPI HTTP client
//!
//! These tests run the client against a mock HTTP server.
//!
//! Test coverage:
//! - Entity decoding and 404 classification
//! - Retry on transient statuses, no retry on permanent ones
//! - Malformed payloads reported as such
//! - Listing query parameters
//! - Body-less existence probes
//! - Reserved characters in keys stay inside the entity segment

mod common;

use mockito::{Matcher, Server, ServerGuard};
use pokecache::domain::errors::{CatalogError, UpstreamError};
use pokecache::domain::models::{EntityRecord, ListWindow, ResourceKind};
use pokecache::domain::ports::CatalogClient;
use pokecache::infrastructure::pokeapi::{PokeApiClient, PokeApiClientConfig};
use pokecache::services::Verifier;
use reqwest::StatusCode;
use std::sync::Arc;

fn client_for(server: &ServerGuard) -> PokeApiClient {
    PokeApiClient::with_config(PokeApiClientConfig {
        base_url: format!("{}/api/v2/", server.url()),
        rate_limit_rps: 1_000,
        burst_size: 1_000,
        max_retries: 2,
        initial_backoff_ms: 1,
        max_backoff_ms: 5,
        timeout_secs: 5,
        ..PokeApiClientConfig::default()
    })
    .expect("client should build")
}

#[tokio::test]
async fn test_fetch_entity_decodes_record() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2/pokemon/bulbasaur")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(common::pokemon_body(1, "bulbasaur", &["grass", "poison"]))
        .create_async()
        .await;

    let record = client_for(&server)
        .fetch_entity(ResourceKind::Pokemon, "bulbasaur")
        .await
        .expect("entity should decode");

    mock.assert_async().await;
    let EntityRecord::Pokemon(pokemon) = record else {
        panic!("expected a pokemon record");
    };
    assert_eq!(pokemon.id, 1);
    assert_eq!(pokemon.type_names(), ["grass", "poison"]);
    assert_eq!(pokemon.artwork_url(), Some("https://img.example/art/1.png"));
}

#[tokio::test]
async fn test_404_is_not_found_and_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2/pokemon/missingno")
        .with_status(404)
        .with_body("Not Found")
        .expect(1)
        .create_async()
        .await;

    let err = client_for(&server)
        .fetch_entity(ResourceKind::Pokemon, "missingno")
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(matches!(
        err,
        CatalogError::NotFound { kind: ResourceKind::Pokemon, ref key } if key == "missingno"
    ));
}

#[tokio::test]
async fn test_server_error_is_retried_then_reported() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2/berry/cheri")
        .with_status(500)
        .with_body("boom")
        .expect(3)
        .create_async()
        .await;

    let err = client_for(&server)
        .fetch_entity(ResourceKind::Berry, "cheri")
        .await
        .unwrap_err();

    mock.assert_async().await;
    match err {
        CatalogError::Upstream(UpstreamError::Status { status, body }) => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "boom");
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2/item/bad")
        .with_status(400)
        .expect(1)
        .create_async()
        .await;

    let err = client_for(&server)
        .fetch_entity(ResourceKind::Item, "bad")
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(!err.is_transient());
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_malformed_payload_is_reported() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2/pokemon/glitch")
        .with_status(200)
        .with_body(r#"{ "id": 0, "name": "glitch" }"#)
        .expect(1)
        .create_async()
        .await;

    let err = client_for(&server)
        .fetch_entity(ResourceKind::Pokemon, "glitch")
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(err.is_malformed());
}

#[tokio::test]
async fn test_fetch_list_sends_window() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2/pokemon/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "20".into()),
            Matcher::UrlEncoded("offset".into(), "40".into()),
        ]))
        .with_status(200)
        .with_body(
            serde_json::json!({
                "count": 45,
                "next": null,
                "previous": "https://pokeapi.co/api/v2/pokemon/?offset=20&limit=20",
                "results": [
                    { "name": "pokemon-41", "url": "https://pokeapi.co/api/v2/pokemon/41/" },
                    { "name": "pokemon-42", "url": "https://pokeapi.co/api/v2/pokemon/42/" }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let page = client_for(&server)
        .fetch_list(ResourceKind::Pokemon, ListWindow::new(20, 40))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.total_count, 45);
    assert!(!page.has_next);
    assert_eq!(page.names(), ["pokemon-41", "pokemon-42"]);
}

#[tokio::test]
async fn test_fetch_whole_listing_uses_unbounded_limit() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2/type/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "-1".into()),
            Matcher::UrlEncoded("offset".into(), "0".into()),
        ]))
        .with_status(200)
        .with_body(r#"{ "count": 1, "next": null, "results": [ { "name": "fire", "url": "u" } ] }"#)
        .create_async()
        .await;

    let page = client_for(&server)
        .fetch_list(ResourceKind::Type, ListWindow::all())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.names(), ["fire"]);
}

#[tokio::test]
async fn test_malformed_listing_is_reported() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v2/berry/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{ "results": "nope" }"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .fetch_list(ResourceKind::Berry, ListWindow::new(20, 0))
        .await
        .unwrap_err();

    assert!(err.is_malformed());
}

#[tokio::test]
async fn test_exists_entity_uses_head() {
    let mut server = Server::new_async().await;
    let found = server
        .mock("HEAD", "/api/v2/pokemon/pikachu")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;
    let missing = server
        .mock("HEAD", "/api/v2/pokemon/missingno")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    assert!(client.exists_entity(ResourceKind::Pokemon, "pikachu").await.unwrap());
    assert!(!client.exists_entity(ResourceKind::Pokemon, "missingno").await.unwrap());

    found.assert_async().await;
    missing.assert_async().await;
}

#[tokio::test]
async fn test_exists_entity_surfaces_server_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("HEAD", "/api/v2/pokemon/pikachu")
        .with_status(503)
        .create_async()
        .await;

    let err = client_for(&server)
        .exists_entity(ResourceKind::Pokemon, "pikachu")
        .await
        .unwrap_err();

    assert!(err.is_transient());
}

#[tokio::test]
async fn test_exists_entity_escapes_reserved_characters() {
    let mut server = Server::new_async().await;
    let listing = server
        .mock("HEAD", "/api/v2/pokemon/")
        .with_status(200)
        .expect(0)
        .create_async()
        .await;
    let escaped = server
        .mock("HEAD", Matcher::Regex(r"^/api/v2/pokemon/%23x$".to_string()))
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let verifier = Verifier::new(Arc::new(client_for(&server)));
    assert!(!verifier.check_existence("#x").await.unwrap());

    listing.assert_async().await;
    escaped.assert_async().await;
}

#[tokio::test]
async fn test_fetch_entity_keeps_slash_inside_key() {
    let mut server = Server::new_async().await;
    let nested = server
        .mock("GET", "/api/v2/pokemon/a/b")
        .with_status(200)
        .with_body(common::pokemon_body(1, "bulbasaur", &["grass"]))
        .expect(0)
        .create_async()
        .await;
    let escaped = server
        .mock("GET", Matcher::Regex(r"^/api/v2/pokemon/a%2Fb$".to_string()))
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let err = client_for(&server)
        .fetch_entity(ResourceKind::Pokemon, "a/b")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    nested.assert_async().await;
    escaped.assert_async().await;
}

#[tokio::test]
async fn test_dot_keys_never_reach_the_listing() {
    let mut server = Server::new_async().await;
    let listing = server
        .mock("HEAD", Matcher::Any)
        .with_status(200)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    assert!(!client.exists_entity(ResourceKind::Pokemon, "..").await.unwrap());
    let err = client
        .fetch_entity(ResourceKind::Pokemon, ".")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    listing.assert_async().await;
}
