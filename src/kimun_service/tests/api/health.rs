use crate::helpers::TestApp;

#[tokio::test]
async fn health_check_returns_200() {
    let app = TestApp::new().await;

    let response = app.get_health().await;

    assert_eq!(response.status().as_u16(), 200);
}
