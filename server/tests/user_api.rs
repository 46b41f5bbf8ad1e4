//! User service router tests against the in-memory user repository.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use carshare_auth::handlers::account_router;
use carshare_auth::mocks::MockUserRepository;
use carshare_auth::{AccountService, PasswordHasher};
use carshare_server::with_middleware;
use carshare_web::ErrorBody;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn setup() -> (Router, MockUserRepository) {
    let users = MockUserRepository::new();
    let service = AccountService::new(users.clone(), PasswordHasher::new(4));
    (with_middleware(account_router(Arc::new(service))), users)
}

async fn post(router: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&bytes).unwrap())
}

fn registration(email: &str, membership: &str) -> Value {
    json!({
        "email": email,
        "password": "hunter22",
        "phone": "+65 1234 5678",
        "membership_level": membership,
    })
}

#[tokio::test]
async fn test_register_then_login() {
    let (router, users) = setup();

    let (status, body) = post(&router, "/register", &registration("ana@example.com", "Premium")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User successfully registered");
    let user_id = body["user_id"].as_i64().unwrap();
    assert_eq!(users.len(), 1);

    let (status, body) = post(
        &router,
        "/login",
        &json!({ "email": "ana@example.com", "password": "hunter22" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User successfully logged in");
    assert_eq!(body["user_id"], user_id);
}

#[tokio::test]
async fn test_invalid_membership_is_bad_request() {
    let (router, users) = setup();

    let (status, body) = post(&router, "/register", &registration("ana@example.com", "Gold")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorBody = serde_json::from_value(body).unwrap();
    assert_eq!(error.code, "INVALID_MEMBERSHIP");
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let (router, _users) = setup();
    post(&router, "/register", &registration("ana@example.com", "basic")).await;

    let (status, body) = post(&router, "/register", &registration("ana@example.com", "basic")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    let error: ErrorBody = serde_json::from_value(body).unwrap();
    assert_eq!(error.code, "CONFLICT");
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_are_unauthorized() {
    let (router, _users) = setup();
    post(&router, "/register", &registration("ana@example.com", "basic")).await;

    let (status, _) = post(
        &router,
        "/login",
        &json!({ "email": "ana@example.com", "password": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post(
        &router,
        "/login",
        &json!({ "email": "bob@example.com", "password": "hunter22" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_fields_are_bad_request() {
    let (router, _users) = setup();

    let (status, body) = post(&router, "/register", &json!({ "email": "ana@example.com" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorBody = serde_json::from_value(body).unwrap();
    assert_eq!(error.code, "BAD_REQUEST");
}

#[tokio::test]
async fn test_repository_failure_is_internal_error() {
    let (router, users) = setup();
    users.fail_next("connection reset");

    let (status, _) = post(&router, "/register", &registration("ana@example.com", "basic")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
