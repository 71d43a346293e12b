use fake::{Fake, faker::internet::en::SafeEmail};
use kimun_adapters::{email::MockEmailClient, http::routes::SuccessResponse};

use crate::helpers::{TestApp, error_message};

#[tokio::test]
async fn should_return_200_and_email_the_code() {
    let app = TestApp::new().await;
    let email: String = SafeEmail().fake();

    let response = app
        .post_send_otp(&serde_json::json!({ "email": email }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert_eq!(
        serde_json::from_str::<SuccessResponse>(&body).unwrap(),
        SuccessResponse::new()
    );

    let code = app.last_code_for(&email).await;
    let record = app.stored_record(&email).await.expect("record stored");
    assert_eq!(record.otp.as_str(), code);
    assert_eq!(record.attempts, 0);
    assert!(!body.contains(&code), "the code must never be returned");
}

#[tokio::test]
async fn should_return_400_for_invalid_emails() {
    let app = TestApp::new().await;

    let test_cases = [
        serde_json::json!({ "email": "" }),
        serde_json::json!({ "email": "delegate.kimun.in" }),
        serde_json::json!({ "email": "delegate@kimun" }),
        serde_json::json!({ "email": "dele gate@kimun.in" }),
        serde_json::json!({ "email": 42 }),
        serde_json::json!({}),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_send_otp(test_case).await;

        assert_eq!(
            response.status().as_u16(),
            400,
            "Failed for input: {:?}",
            test_case
        );
        assert_eq!(error_message(response).await, "Invalid email format");
    }

    assert!(app.email_client.sent().await.is_empty());
}

#[tokio::test]
async fn should_return_400_for_malformed_json() {
    let app = TestApp::new().await;

    let response = app.post_raw("/api/send-otp", "{\"email\":").await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(error_message(response).await, "Invalid email format");
}

#[tokio::test]
async fn should_return_500_and_keep_no_record_when_email_fails() {
    let app = TestApp::with_email_client(MockEmailClient::failing()).await;

    let response = app
        .post_send_otp(&serde_json::json!({ "email": "a@b.com" }))
        .await;

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(
        error_message(response).await,
        "Failed to send OTP. Please try again later."
    );
    assert!(app.stored_record("a@b.com").await.is_none());
}
