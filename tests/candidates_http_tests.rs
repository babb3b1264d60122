mod common;

use common::TestApp;
use reqwest::multipart;

fn candidate_form() -> multipart::Form {
    multipart::Form::new()
        .text("name", "Jane Doe")
        .text("email", "jane@x.com")
        .text("phone", "555-123-4567")
        .text("jobTitle", "Engineer")
}

#[tokio::test]
async fn test_create_candidate_requires_token() {
    let app = TestApp::new().await;

    let response = app
        .client
        .post(app.url("/api/candidates"))
        .multipart(candidate_form())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_create_candidate_rejects_exe_resume_before_anything_is_stored() {
    let app = TestApp::new().await;

    let resume = multipart::Part::bytes(b"MZ fake executable".to_vec())
        .file_name("payload.exe")
        .mime_str("application/octet-stream")
        .unwrap();

    let response = app
        .client
        .post(app.url("/api/candidates"))
        .header("Authorization", format!("Bearer {}", app.bearer_token()))
        .multipart(candidate_form().part("resume", resume))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    let message = body["fields"]["resume"].as_str().unwrap();
    assert!(message.contains(".pdf"), "unexpected message: {message}");
}

#[tokio::test]
async fn test_create_candidate_rejects_missing_name() {
    let app = TestApp::new().await;

    let form = multipart::Form::new()
        .text("email", "jane@x.com")
        .text("phone", "555-123-4567")
        .text("jobTitle", "Engineer");

    let response = app
        .client
        .post(app.url("/api/candidates"))
        .header("Authorization", format!("Bearer {}", app.bearer_token()))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["fields"]["name"].is_string(), "unexpected body: {body}");
}

#[tokio::test]
async fn test_create_candidate_rejects_invalid_phone() {
    let app = TestApp::new().await;

    let form = multipart::Form::new()
        .text("name", "Jane Doe")
        .text("email", "jane@x.com")
        .text("phone", "call me maybe")
        .text("jobTitle", "Engineer");

    let response = app
        .client
        .post(app.url("/api/candidates"))
        .header("Authorization", format!("Bearer {}", app.bearer_token()))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["fields"]["phone"].is_string(), "unexpected body: {body}");
}

#[tokio::test]
async fn test_update_candidate_rejects_unknown_status() {
    let app = TestApp::new().await;

    let form = multipart::Form::new().text("status", "Interview");

    let response = app
        .client
        .put(app.url(&format!("/api/candidates/{}", uuid::Uuid::now_v7())))
        .header("Authorization", format!("Bearer {}", app.bearer_token()))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    let message = body["fields"]["status"].as_str().unwrap();
    assert!(message.contains("Pending"), "unexpected message: {message}");
}

#[tokio::test]
async fn test_status_check_rejects_malformed_email() {
    let app = TestApp::new().await;

    let response = app
        .client
        .get(app.url("/api/candidates/status/check?email=not-an-email"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}
