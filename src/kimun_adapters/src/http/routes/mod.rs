pub mod error;
pub mod health;
pub mod send_otp;
pub mod verify_otp;

use serde::{Deserialize, Serialize};

pub use error::{ErrorResponse, OtpApiError};
pub use health::health_check;
pub use send_otp::{SendOtpRequest, send_otp};
pub use verify_otp::{VerifyOtpRequest, verify_otp};

/// Body returned by both endpoints on success: `{ "success": true }`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn new() -> Self {
        Self { success: true }
    }
}

impl Default for SuccessResponse {
    fn default() -> Self {
        Self::new()
    }
}
