use chrono::TimeDelta;
use serde::Deserialize;

use super::otp_error::OtpError;

pub const DEFAULT_TTL_MINUTES: i64 = 15;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Longest lifetime a code may be given: one day.
pub const MAX_TTL_MINUTES: i64 = 24 * 60;

/// Lifetime and attempt ceiling applied to every issued code.
///
/// Only valid policies can be built: the lifetime lies within
/// `1..=MAX_TTL_MINUTES` and at least one attempt is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawOtpPolicy")]
pub struct OtpPolicy {
    ttl: TimeDelta,
    max_attempts: u32,
}

impl OtpPolicy {
    pub fn new(ttl_minutes: i64, max_attempts: u32) -> Result<Self, OtpError> {
        let ttl = TimeDelta::try_minutes(ttl_minutes)
            .filter(|_| (1..=MAX_TTL_MINUTES).contains(&ttl_minutes))
            .ok_or(OtpError::InvalidTtl(ttl_minutes))?;

        if max_attempts == 0 {
            return Err(OtpError::InvalidMaxAttempts);
        }

        Ok(Self { ttl, max_attempts })
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    pub fn ttl_minutes(&self) -> i64 {
        self.ttl.num_minutes()
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self {
            ttl: TimeDelta::minutes(DEFAULT_TTL_MINUTES),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[derive(Deserialize)]
struct RawOtpPolicy {
    #[serde(default = "default_ttl_minutes")]
    ttl_minutes: i64,
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,
}

impl TryFrom<RawOtpPolicy> for OtpPolicy {
    type Error = OtpError;

    fn try_from(raw: RawOtpPolicy) -> Result<Self, Self::Error> {
        Self::new(raw.ttl_minutes, raw.max_attempts)
    }
}

fn default_ttl_minutes() -> i64 {
    DEFAULT_TTL_MINUTES
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}
