pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::Email,
    otp_code::{OTP_LENGTH, OtpCode},
    otp_error::OtpError,
    otp_policy::OtpPolicy,
    otp_record::{OtpRecord, Verdict},
    record_key::{OTP_COLLECTION, RecordKey},
};

pub use ports::{
    clock::{Clock, ManualClock, SystemClock},
    repositories::{OtpStore, OtpStoreError, Version, Versioned},
    services::EmailClient,
};
