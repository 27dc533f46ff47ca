//! Movies resource against the in-process mock service.

mod support;

use marquee_core::{Category, MovieDraft, MovieId};
use marquee_remote::{RemoteClient, RemoteConfig, RemoteError};
use serde_json::json;

use support::MockApi;

async fn client_for(api: MockApi) -> RemoteClient {
    let base = api.start().await;
    RemoteClient::new(&RemoteConfig::with_base_url(base)).unwrap()
}

fn draft(title: &str) -> MovieDraft {
    MovieDraft {
        title: title.to_string(),
        description: "A movie".to_string(),
        image: "https://img.example/poster.png".to_string(),
        rating: 4.0,
        category: Category::New,
    }
}

#[tokio::test]
async fn fetch_all_keeps_server_order_and_decodes_form_values() {
    let api = MockApi::new();
    api.seed(
        "movies",
        vec![
            json!({"id": "2", "title": "Second", "rating": "3.5", "category": "topRated"}),
            json!({"id": 1, "title": "First", "rating": 5, "category": "trending"}),
        ],
    );
    let client = client_for(api).await;

    let movies = client.movies().fetch_all().await.unwrap();

    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].id.as_str(), "2");
    assert_eq!(movies[0].category, Category::TopRated);
    assert!((movies[0].rating - 3.5).abs() < f64::EPSILON);
    assert_eq!(movies[1].id.as_str(), "1");
}

#[tokio::test]
async fn fetch_all_accepts_empty_array() {
    let api = MockApi::new();
    api.seed("movies", vec![]);
    let client = client_for(api).await;

    assert!(client.movies().fetch_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn fetch_all_rejects_empty_and_null_bodies() {
    let api = MockApi::new();
    api.respond_raw("movies", 200, "");
    let client = client_for(api.clone()).await;

    let err = client.movies().fetch_all().await.unwrap_err();
    assert!(matches!(err, RemoteError::EmptyPayload { .. }));

    api.respond_raw("movies", 200, "null");
    let err = client.movies().fetch_all().await.unwrap_err();
    assert!(matches!(err, RemoteError::EmptyPayload { .. }));
}

#[tokio::test]
async fn fetch_all_reports_http_status() {
    let api = MockApi::new();
    api.respond_raw("movies", 500, "boom");
    let client = client_for(api).await;

    let err = client.movies().fetch_all().await.unwrap_err();

    assert!(matches!(err, RemoteError::Http { status: 500, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn fetch_all_reports_malformed_payloads() {
    let api = MockApi::new();
    api.respond_raw("movies", 200, "{\"truncated\":");
    let client = client_for(api.clone()).await;

    let err = client.movies().fetch_all().await.unwrap_err();
    assert!(matches!(err, RemoteError::Deserialization(_)));

    api.respond_raw(
        "movies",
        200,
        r#"[{"id":"1","title":"X","category":"documentary"}]"#,
    );
    let err = client.movies().fetch_all().await.unwrap_err();
    assert!(matches!(err, RemoteError::Deserialization(_)));
}

#[tokio::test]
async fn unreachable_service_is_a_connection_failure() {
    let client = RemoteClient::new(&RemoteConfig::with_base_url("http://127.0.0.1:1")).unwrap();

    let err = client.movies().fetch_all().await.unwrap_err();

    assert!(matches!(
        err,
        RemoteError::ConnectionFailed(_) | RemoteError::Timeout(_)
    ));
}

#[tokio::test]
async fn create_returns_server_assigned_id() {
    let api = MockApi::new();
    let client = client_for(api.clone()).await;

    let movie = client.movies().create(&draft("Dune")).await.unwrap();

    assert!(!movie.id.as_str().is_empty());
    assert_eq!(movie.title, "Dune");
    assert_eq!(movie.category, Category::New);

    let stored = api.records("movies");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["title"], "Dune");
    assert_eq!(stored[0]["category"], "new");
}

#[tokio::test]
async fn replace_updates_existing_movie() {
    let api = MockApi::new();
    api.seed("movies", vec![json!({"id": "7", "title": "Old"})]);
    let client = client_for(api.clone()).await;

    let movie = client
        .movies()
        .replace(&MovieId::from("7"), &draft("New"))
        .await
        .unwrap();

    assert_eq!(movie.id.as_str(), "7");
    assert_eq!(movie.title, "New");
    assert_eq!(api.records("movies")[0]["title"], "New");
}

#[tokio::test]
async fn replace_and_delete_missing_movie_are_not_found() {
    let api = MockApi::new();
    api.seed("movies", vec![]);
    let client = client_for(api).await;

    let err = client
        .movies()
        .replace(&MovieId::from("9"), &draft("X"))
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::NotFound { ref id, .. } if id == "9"));

    let err = client.movies().delete(&MovieId::from("9")).await.unwrap_err();
    assert!(matches!(err, RemoteError::NotFound { .. }));
}

#[tokio::test]
async fn delete_removes_movie() {
    let api = MockApi::new();
    api.seed(
        "movies",
        vec![json!({"id": "1", "title": "A"}), json!({"id": "2", "title": "B"})],
    );
    let client = client_for(api.clone()).await;

    client.movies().delete(&MovieId::from("1")).await.unwrap();

    let remaining = api.records("movies");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["id"], "2");
}
