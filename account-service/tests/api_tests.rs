mod common;

use account_service::repositories::InMemoryRoleRepository;
use chrono::Duration;
use common::token_of;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

fn alice() -> serde_json::Value {
    json!({
        "userName": "alice",
        "email": "a@example.com",
        "phone": "111",
        "password": "hunter2"
    })
}

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::spawn().await;

    let response = app.register(alice()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let first = token_of(response).await;
    assert!(app.introspect(&first).await);

    let response = app.login("alice", "hunter2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = token_of(response).await;

    assert_ne!(first, second);
    assert!(app.introspect(&second).await);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;
    app.register(alice()).await;

    let response = app
        .register(json!({
            "userName": "bob",
            "email": "a@example.com",
            "phone": "222",
            "password": "pw"
        }))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 409);
    assert_eq!(body["data"]["code"], "EMAIL_TAKEN");

    // Nothing was stored for bob
    let response = app.login("bob", "pw").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_reports_first_collision() {
    let app = TestApp::spawn().await;
    app.register(alice()).await;

    let response = app
        .register(json!({
            "userName": "alice",
            "email": "other@example.com",
            "phone": "111",
            "password": "pw"
        }))
        .await;
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["code"], "PHONE_TAKEN");

    let response = app
        .register(json!({
            "userName": "alice",
            "email": "other@example.com",
            "phone": "999",
            "password": "pw"
        }))
        .await;
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["code"], "USER_EXISTED");
}

#[tokio::test]
async fn test_register_invalid_phone() {
    let app = TestApp::spawn().await;

    let response = app
        .register(json!({
            "userName": "mallory",
            "email": "m@example.com",
            "phone": "%",
            "password": "pw"
        }))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["code"], "INVALID_PHONE");
}

#[tokio::test]
async fn test_register_without_default_role() {
    let app = TestApp::spawn_with_roles(InMemoryRoleRepository::new()).await;

    let response = app.register(alice()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn test_login_with_phone_identifier() {
    let app = TestApp::spawn().await;
    app.register(json!({
        "userName": "carol",
        "email": "c@example.com",
        "phone": "333",
        "password": "pw"
    }))
    .await;

    let response = app.login("333", "pw").await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = token_of(response).await;
    assert!(app.introspect(&token).await);

    let response = app.login("c@example.com", "pw").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestApp::spawn().await;
    app.register(alice()).await;

    let response = app.login("nobody", "hunter2").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["code"], "UNABLE_TO_LOGIN");

    let response = app.login("alice", "wrong").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["code"], "PASSWORD_NOT_CORRECT");
}

#[tokio::test]
async fn test_introspect_expired_token() {
    let app = TestApp::spawn().await;
    let token = token_of(app.register(alice()).await).await;

    app.clock.advance(Duration::seconds(61));

    assert!(!app.introspect(&token).await);
}

#[tokio::test]
async fn test_introspect_garbage_token() {
    let app = TestApp::spawn().await;

    assert!(!app.introspect("invalid.token.here").await);
    assert!(!app.introspect("").await);
}

#[tokio::test]
async fn test_logout_within_refresh_window() {
    let app = TestApp::spawn().await;
    let token = token_of(app.register(alice()).await).await;

    app.clock.advance(Duration::seconds(120));
    assert!(!app.introspect(&token).await);

    let response = app.logout(&token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_past_refresh_window() {
    let app = TestApp::spawn().await;
    let token = token_of(app.register(alice()).await).await;

    app.clock.advance(Duration::seconds(3700));

    let response = app.logout(&token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_malformed_token() {
    let app = TestApp::spawn().await;

    let response = app.logout("not-a-token").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["code"], "INTERNAL_ERROR");
}
