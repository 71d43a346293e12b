use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kimun_application::{IssueOtpError, VerifyOtpError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors surfaced by the OTP endpoints. The display text is exactly the
/// message sent to the client.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OtpApiError {
    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid email or OTP format")]
    InvalidEmailOrOtp,

    #[error("OTP not found or expired. Please request a new one.")]
    NotFound,

    #[error("Too many attempts. Please request a new OTP.")]
    TooManyAttempts,

    #[error("OTP expired. Please request a new one.")]
    Expired,

    #[error("Invalid OTP")]
    InvalidOtp,

    #[error("Failed to send OTP. Please try again later.")]
    SendFailed,

    #[error("Failed to verify OTP. Please try again later.")]
    VerifyFailed,
}

impl OtpApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            OtpApiError::InvalidEmail | OtpApiError::InvalidEmailOrOtp => StatusCode::BAD_REQUEST,
            OtpApiError::NotFound => StatusCode::NOT_FOUND,
            OtpApiError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            OtpApiError::Expired => StatusCode::GONE,
            OtpApiError::InvalidOtp => StatusCode::UNAUTHORIZED,
            OtpApiError::SendFailed | OtpApiError::VerifyFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for OtpApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (self.status_code(), body).into_response()
    }
}

impl From<IssueOtpError> for OtpApiError {
    fn from(error: IssueOtpError) -> Self {
        tracing::error!(error = %error, "Failed to issue OTP");
        OtpApiError::SendFailed
    }
}

impl From<VerifyOtpError> for OtpApiError {
    fn from(error: VerifyOtpError) -> Self {
        match error {
            VerifyOtpError::NotFound => OtpApiError::NotFound,
            VerifyOtpError::TooManyAttempts => OtpApiError::TooManyAttempts,
            VerifyOtpError::Expired => OtpApiError::Expired,
            VerifyOtpError::Mismatch => OtpApiError::InvalidOtp,
            VerifyOtpError::StoreUnavailable(e) => {
                tracing::error!(error = %e, "Failed to verify OTP");
                OtpApiError::VerifyFailed
            }
        }
    }
}
