pub mod messages;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use messages::OtpEmail;
pub use use_cases::{
    issue_otp::{IssueOtpError, IssueOtpUseCase},
    verify_otp::{VerifyOtpError, VerifyOtpUseCase},
};
