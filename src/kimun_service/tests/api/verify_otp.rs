use chrono::TimeDelta;
use kimun_adapters::http::routes::SuccessResponse;

use crate::helpers::{TestApp, error_message};

#[tokio::test]
async fn should_return_200_for_correct_code_and_consume_record() {
    let app = TestApp::new().await;
    let code = app.issue("delegate@kimun.in").await;

    let response = app.verify("delegate@kimun.in", &code).await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.json::<SuccessResponse>().await.unwrap(),
        SuccessResponse::new()
    );
    assert!(app.stored_record("delegate@kimun.in").await.is_none());
}

#[tokio::test]
async fn should_return_404_without_issuance() {
    let app = TestApp::new().await;

    let response = app.verify("delegate@kimun.in", "123456").await;

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(
        error_message(response).await,
        "OTP not found or expired. Please request a new one."
    );
}

#[tokio::test]
async fn should_invalidate_after_three_wrong_codes() {
    let app = TestApp::new().await;
    app.seed_record("delegate@kimun.in", "123456").await;

    let first = app.verify("delegate@kimun.in", "000000").await;
    assert_eq!(first.status().as_u16(), 401);
    assert_eq!(error_message(first).await, "Invalid OTP");

    let second = app.verify("delegate@kimun.in", "000000").await;
    assert_eq!(second.status().as_u16(), 401);

    let third = app.verify("delegate@kimun.in", "000000").await;
    assert_eq!(third.status().as_u16(), 429);
    assert_eq!(
        error_message(third).await,
        "Too many attempts. Please request a new OTP."
    );
    assert!(app.stored_record("delegate@kimun.in").await.is_none());

    // The correct code no longer helps
    let after = app.verify("delegate@kimun.in", "123456").await;
    assert_eq!(after.status().as_u16(), 404);
}

#[tokio::test]
async fn should_return_410_after_expiry_and_remove_record() {
    let app = TestApp::new().await;
    let code = app.issue("delegate@kimun.in").await;

    app.clock.advance(TimeDelta::minutes(16));
    let response = app.verify("delegate@kimun.in", &code).await;

    assert_eq!(response.status().as_u16(), 410);
    assert_eq!(
        error_message(response).await,
        "OTP expired. Please request a new one."
    );
    assert!(app.stored_record("delegate@kimun.in").await.is_none());
}

#[tokio::test]
async fn should_accept_code_just_before_expiry() {
    let app = TestApp::new().await;
    let code = app.issue("delegate@kimun.in").await;

    app.clock.advance(TimeDelta::minutes(15));
    let response = app.verify("delegate@kimun.in", &code).await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn should_invalidate_earlier_code_on_reissue() {
    let app = TestApp::new().await;
    let old_code = app.issue("delegate@kimun.in").await;
    let mut new_code = app.issue("delegate@kimun.in").await;
    while new_code == old_code {
        new_code = app.issue("delegate@kimun.in").await;
    }

    let old = app.verify("delegate@kimun.in", &old_code).await;
    assert_eq!(old.status().as_u16(), 401);

    let new = app.verify("delegate@kimun.in", &new_code).await;
    assert_eq!(new.status().as_u16(), 200);
}

#[tokio::test]
async fn should_follow_documented_scenario() {
    let app = TestApp::new().await;
    app.seed_record("a@b.com", "123456").await;

    let wrong = app.verify("a@b.com", "654321").await;
    assert_eq!(wrong.status().as_u16(), 401);
    assert_eq!(error_message(wrong).await, "Invalid OTP");
    assert_eq!(app.stored_record("a@b.com").await.unwrap().attempts, 1);

    let right = app.verify("a@b.com", "123456").await;
    assert_eq!(right.status().as_u16(), 200);
    assert!(app.stored_record("a@b.com").await.is_none());

    let again = app.verify("a@b.com", "123456").await;
    assert_eq!(again.status().as_u16(), 404);
}

#[tokio::test]
async fn should_return_400_for_malformed_input() {
    let app = TestApp::new().await;
    app.seed_record("a@b.com", "123456").await;

    let test_cases = [
        serde_json::json!({ "email": "not-an-email", "otp": "123456" }),
        serde_json::json!({ "email": "a@b.com", "otp": "12345" }),
        serde_json::json!({ "email": "a@b.com", "otp": "1234567" }),
        serde_json::json!({ "email": "a@b.com" }),
        serde_json::json!({ "otp": "123456" }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_verify_otp(test_case).await;

        assert_eq!(
            response.status().as_u16(),
            400,
            "Failed for input: {:?}",
            test_case
        );
        assert_eq!(error_message(response).await, "Invalid email or OTP format");
    }

    // Malformed requests never count as attempts
    assert_eq!(app.stored_record("a@b.com").await.unwrap().attempts, 0);
}
