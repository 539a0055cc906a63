//! Login flow tests.

use serde_json::json;
use stockroom_auth::{AuthClient, TokenStore, logout};
use stockroom_core::Error;
use stockroom_tests::helpers::start_backend;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_login_success_stores_token() {
    let server = start_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login/access-token"))
        .and(body_string_contains("username=admin"))
        .and(body_string_contains("password=secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok_live",
            "token_type": "bearer",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthClient::new(server.uri());
    let token = auth.login("admin", "secret").await.unwrap();
    assert_eq!(token.access_token, "tok_live");
    assert_eq!(token.token_type, "bearer");

    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::at(dir.path().join("access_token"));
    store.save(&token.access_token).unwrap();
    assert!(store.is_logged_in());

    logout(&store).unwrap();
    assert!(!store.is_logged_in());
}

#[tokio::test]
async fn test_login_failure_surfaces_detail_and_yields_no_token() {
    let server = start_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login/access-token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": "Incorrect email or password",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthClient::new(server.uri());
    let err = auth.login("admin", "wrong").await.unwrap_err();

    assert!(matches!(err, Error::Auth(_)));
    assert_eq!(err.to_string(), "Incorrect email or password");
}

#[tokio::test]
async fn test_login_failure_without_detail_falls_back_to_generic_message() {
    let server = start_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login/access-token"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthClient::new(server.uri());
    let err = auth.login("admin", "secret").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Login failed. Please check your credentials."
    );
}
