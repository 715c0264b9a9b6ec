//! Behavior tests for the PokéAPI client against a mocked HTTP backend.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pokelens_pokeapi::{PokeApiClient, PokeApiError};

fn pikachu_json() -> serde_json::Value {
    serde_json::json!({
        "id": 25,
        "name": "pikachu",
        "height": 4,
        "weight": 60,
        "abilities": [
            {"is_hidden": false, "slot": 1, "ability": {"name": "static", "url": ""}}
        ],
        "stats": [
            {"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": ""}}
        ],
        "types": [
            {"slot": 1, "type": {"name": "electric", "url": ""}}
        ],
        "sprites": {"front_default": "https://example.test/25.png"}
    })
}

fn test_client(base_url: String, cache_ttl: Duration) -> PokeApiClient {
    PokeApiClient::with_config(
        base_url,
        Duration::from_secs(2),
        3,
        Duration::from_millis(5),
        cache_ttl,
    )
}

#[tokio::test]
async fn second_lookup_within_ttl_hits_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pikachu_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(server.uri(), Duration::from_secs(3600));

    let first = client.get_by_id(25).await.unwrap();
    let second = client.get_by_id(25).await.unwrap();

    assert_eq!(first.name, "pikachu");
    assert_eq!(second.name, "pikachu");
    // expect(1) verifies on drop that exactly one request reached the server.
}

#[tokio::test]
async fn lookup_after_ttl_expiry_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pikachu_json()))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(server.uri(), Duration::from_millis(40));

    client.get_by_id(25).await.unwrap();
    tokio::time::sleep(Duration::from_millis(60)).await;
    client.get_by_id(25).await.unwrap();
}

#[tokio::test]
async fn not_found_is_permanent_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/99999"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(server.uri(), Duration::from_secs(3600));

    match client.get_by_id(99999).await {
        Err(PokeApiError::NotFound(url)) => assert!(url.contains("/pokemon/99999")),
        other => panic!("expected NotFound, got {:?}", other.map(|p| p.name)),
    }
}

#[tokio::test]
async fn transient_failures_retried_until_success() {
    let server = MockServer::start().await;

    // Two connection-level failures, then a good response.
    Mock::given(method("GET"))
        .and(path("/pokemon/25"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pokemon/25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pikachu_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(server.uri(), Duration::from_secs(3600));

    let pokemon = client.get_by_id(25).await.unwrap();
    assert_eq!(pokemon.id, 25);

    // Exactly 3 attempts reached the server.
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn retry_budget_exhausted_surfaces_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/25"))
        .respond_with(ResponseTemplate::new(503))
        .expect(4) // initial attempt + 3 retries
        .mount(&server)
        .await;

    let client = test_client(server.uri(), Duration::from_secs(3600));

    match client.get_by_id(25).await {
        Err(PokeApiError::Remote {
            attempts, cause, ..
        }) => {
            assert_eq!(attempts, 4);
            assert!(cause.contains("503"));
        }
        other => panic!("expected Remote, got {:?}", other.map(|p| p.name)),
    }
}

#[tokio::test]
async fn malformed_json_is_transient() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/25"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .expect(4)
        .mount(&server)
        .await;

    let client = test_client(server.uri(), Duration::from_secs(3600));

    match client.get_by_id(25).await {
        Err(PokeApiError::Remote { cause, .. }) => assert!(cause.contains("JSON decode")),
        other => panic!("expected Remote, got {:?}", other.map(|p| p.name)),
    }
}

#[tokio::test]
async fn invalid_arguments_never_reach_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pikachu_json()))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(server.uri(), Duration::from_secs(3600));

    assert!(matches!(
        client.get_by_id(-1).await,
        Err(PokeApiError::InvalidArgument(_))
    ));
    assert!(matches!(
        client.get_by_name("").await,
        Err(PokeApiError::InvalidArgument(_))
    ));
    assert!(matches!(
        client.get_by_name("   ").await,
        Err(PokeApiError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn name_lookup_normalizes_and_populates_id_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/pikachu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pikachu_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(server.uri(), Duration::from_secs(3600));

    let by_name = client.get_by_name("  PIKACHU  ").await.unwrap();
    assert_eq!(by_name.id, 25);

    // The fetch populated pokemon_id_25 as well, so an id lookup is served
    // from cache without touching /pokemon/25.
    let by_id = client.get_by_id(25).await.unwrap();
    assert_eq!(by_id.name, "pikachu");

    let stats = client.cache_stats();
    assert_eq!(stats.total_entries, 2);
    assert_eq!(stats.pokemon_by_id, 1);
    assert_eq!(stats.pokemon_by_name, 1);
}

#[tokio::test]
async fn summary_projection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pikachu_json()))
        .mount(&server)
        .await;

    let client = test_client(server.uri(), Duration::from_secs(3600));

    let summary = client.summary_by_id(25).await.unwrap();
    assert_eq!(summary.name, "pikachu");
    assert_eq!(summary.types, vec!["electric"]);
    assert_eq!(summary.sprite_url.as_deref(), Some("https://example.test/25.png"));
}
