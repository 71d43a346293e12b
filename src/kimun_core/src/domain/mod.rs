pub mod email;
pub mod otp_code;
pub mod otp_error;
pub mod otp_policy;
pub mod otp_record;
pub mod record_key;
