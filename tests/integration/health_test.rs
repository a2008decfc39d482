//! Integration tests for the health endpoint.

mod helpers;

use http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_health_reports_ok_without_session() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["store"], "memory");
    assert_eq!(response.body["data"]["version"], env!("CARGO_PKG_VERSION"));
}
