use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{otp_record::OtpRecord, record_key::RecordKey};

/// Opaque revision marker handed out by a store on every read and write.
///
/// Stores choose the representation (an ETag, the raw stored payload, a
/// counter); callers only hand it back for conditional writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A value read together with the version it was read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub value: T,
    pub version: Version,
}

// OtpStore port trait and errors
#[derive(Debug, Error)]
pub enum OtpStoreError {
    #[error("Record was modified concurrently")]
    VersionConflict,
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl PartialEq for OtpStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::VersionConflict, Self::VersionConflict)
                | (Self::MalformedRecord(_), Self::MalformedRecord(_))
                | (Self::Unavailable(_), Self::Unavailable(_))
        )
    }
}

/// Persistence for OTP records, one record per key.
///
/// `replace` and `delete` only succeed if the record is still at `expected`;
/// otherwise they fail with [`OtpStoreError::VersionConflict`], including when
/// the record has disappeared in the meantime.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Unconditionally overwrites the record under `key`.
    async fn put(&self, key: &RecordKey, record: &OtpRecord) -> Result<Version, OtpStoreError>;

    async fn get(&self, key: &RecordKey) -> Result<Option<Versioned<OtpRecord>>, OtpStoreError>;

    async fn replace(
        &self,
        key: &RecordKey,
        expected: &Version,
        record: &OtpRecord,
    ) -> Result<Version, OtpStoreError>;

    async fn delete(&self, key: &RecordKey, expected: &Version) -> Result<(), OtpStoreError>;
}
