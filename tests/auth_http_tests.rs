mod common;

use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let app = TestApp::new().await;

    let response = app
        .client
        .post(app.url("/api/users/register"))
        .json(&json!({
            "name": "Jane Doe",
            "email": "not-an-email",
            "password": "secret123"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(
        body["fields"]["email"].is_string(),
        "error should name the email field: {body}"
    );
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = TestApp::new().await;

    let response = app
        .client
        .post(app.url("/api/users/register"))
        .json(&json!({
            "name": "Jane Doe",
            "email": "jane@x.com",
            "password": "12345"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["fields"]["password"].is_string(), "unexpected body: {body}");
}

#[tokio::test]
async fn test_register_rejects_one_character_name() {
    let app = TestApp::new().await;

    let response = app
        .client
        .post(app.url("/api/users/register"))
        .json(&json!({
            "name": "J",
            "email": "jane@x.com",
            "password": "secret123"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["fields"]["name"].is_string(), "unexpected body: {body}");
}

#[tokio::test]
async fn test_candidates_require_bearer_token() {
    let app = TestApp::new().await;

    let response = app
        .client
        .get(app.url("/api/candidates"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "AUTHENTICATION_FAILED");
}

#[tokio::test]
async fn test_candidates_reject_garbage_token() {
    let app = TestApp::new().await;

    let response = app
        .client
        .get(app.url("/api/candidates"))
        .header("Authorization", "Bearer not.a.jwt")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_candidates_reject_malformed_authorization_header() {
    let app = TestApp::new().await;

    let response = app
        .client
        .get(app.url("/api/candidates"))
        .header("Authorization", "Token abc")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
}
