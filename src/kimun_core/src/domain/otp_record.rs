use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{otp_code::OtpCode, otp_policy::OtpPolicy};

/// The single live passcode for an email key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRecord {
    pub otp: OtpCode,
    /// Absolute expiry in epoch milliseconds.
    pub expires_at: i64,
    pub attempts: u32,
}

/// Outcome of checking a candidate code against a stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The attempt ceiling is reached; the record must be removed.
    TooManyAttempts,
    /// The record outlived its expiry; it must be removed.
    Expired,
    /// Wrong code. The record stays, replaced by `updated`.
    Mismatch { updated: OtpRecord },
    /// Correct code; the record is consumed.
    Accepted,
}

impl OtpRecord {
    pub fn issue(otp: OtpCode, now: DateTime<Utc>, policy: &OtpPolicy) -> Self {
        Self {
            otp,
            expires_at: (now + policy.ttl()).timestamp_millis(),
            attempts: 0,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() > self.expires_at
    }

    /// Checks are applied in a fixed order: attempts, then expiry, then the
    /// code itself. A wrong code that brings `attempts` up to the ceiling
    /// invalidates the record immediately.
    pub fn evaluate(&self, candidate: &OtpCode, now: DateTime<Utc>, policy: &OtpPolicy) -> Verdict {
        if self.attempts >= policy.max_attempts() {
            return Verdict::TooManyAttempts;
        }

        if self.is_expired(now) {
            return Verdict::Expired;
        }

        if !self.otp.matches(candidate) {
            let updated = Self {
                attempts: self.attempts.saturating_add(1),
                ..self.clone()
            };
            if updated.attempts >= policy.max_attempts() {
                return Verdict::TooManyAttempts;
            }
            return Verdict::Mismatch { updated };
        }

        Verdict::Accepted
    }
}
