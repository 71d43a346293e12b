use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use super::otp_error::OtpError;

pub const OTP_LENGTH: usize = 6;

const LOWEST_CODE: u32 = 100_000;
const HIGHEST_CODE: u32 = 999_999;

/// A one-time passcode, either freshly generated or supplied by a caller.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OtpCode(String);

impl OtpCode {
    /// Draws a uniformly random six digit code with no leading zero.
    pub fn generate() -> Self {
        let code = rand::rng().random_range(LOWEST_CODE..=HIGHEST_CODE);
        Self(code.to_string())
    }

    /// Accepts any candidate of exactly [`OTP_LENGTH`] characters. Whether it
    /// matches the stored code is decided at verification time.
    pub fn parse(code: String) -> Result<Self, OtpError> {
        if code.chars().count() == OTP_LENGTH {
            Ok(Self(code))
        } else {
            Err(OtpError::InvalidCode(OTP_LENGTH))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares in time independent of where the codes first differ.
    pub fn matches(&self, other: &OtpCode) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl PartialEq for OtpCode {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl Eq for OtpCode {}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(******)")
    }
}
