mod common;

use common::TestApp;

#[tokio::test]
async fn test_health_check_is_public() {
    let app = TestApp::new().await;

    let response = app
        .client
        .get(app.url("/health"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}
