use thiserror::Error;

/// Errors raised while parsing OTP request input or policy settings into
/// domain types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OtpError {
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("OTP must be exactly {0} characters")]
    InvalidCode(usize),
    #[error("OTP lifetime of {0} minutes is out of range")]
    InvalidTtl(i64),
    #[error("OTP policy must allow at least one attempt")]
    InvalidMaxAttempts,
}
