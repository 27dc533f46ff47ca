//! Users resource against the in-process mock service.

mod support;

use marquee_core::{Credentials, UserDraft, UserId};
use marquee_remote::{RemoteClient, RemoteConfig, RemoteError};
use serde_json::json;

use support::MockApi;

async fn client_for(api: MockApi) -> RemoteClient {
    let base = api.start().await;
    RemoteClient::new(&RemoteConfig::with_base_url(base)).unwrap()
}

fn seeded() -> MockApi {
    let api = MockApi::new();
    api.seed(
        "users",
        vec![
            json!({"id": "1", "username": "ana", "email": "ana@example.com", "password": "secret1"}),
            json!({"id": 2, "username": "ben", "email": "ben@example.com", "password": "hunter22"}),
        ],
    );
    api
}

#[tokio::test]
async fn login_matches_username_and_password() {
    let client = client_for(seeded()).await;

    let user = client
        .users()
        .login(&Credentials {
            username: "ben".to_string(),
            password: "hunter22".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.id.as_str(), "2");
    assert_eq!(user.email, "ben@example.com");
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let client = client_for(seeded()).await;

    let err = client
        .users()
        .login(&Credentials {
            username: "ana".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, RemoteError::InvalidCredentials));
}

#[tokio::test]
async fn register_then_get() {
    let api = MockApi::new();
    let client = client_for(api.clone()).await;

    let created = client
        .users()
        .create(&UserDraft {
            username: "cleo".to_string(),
            email: "cleo@example.com".to_string(),
            password: "pa55word".to_string(),
        })
        .await
        .unwrap();

    let fetched = client.users().get(&created.id).await.unwrap();
    assert_eq!(fetched.username, "cleo");
    assert_eq!(api.records("users")[0]["password"], "pa55word");
}

#[tokio::test]
async fn update_and_delete_user() {
    let api = seeded();
    let client = client_for(api.clone()).await;
    let id = UserId::from("1");

    let updated = client
        .users()
        .update(
            &id,
            &UserDraft {
                username: "ana".to_string(),
                email: "ana@new.example".to_string(),
                password: "secret1".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.email, "ana@new.example");

    client.users().delete(&id).await.unwrap();
    assert_eq!(client.users().list().await.unwrap().len(), 1);

    let err = client.users().get(&id).await.unwrap_err();
    assert!(matches!(err, RemoteError::NotFound { .. }));
}
