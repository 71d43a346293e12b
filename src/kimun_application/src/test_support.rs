use std::collections::HashMap;
use std::sync::Arc;

use kimun_core::{
    Email, EmailClient, OtpRecord, OtpStore, OtpStoreError, RecordKey, Version, Versioned,
};
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

#[derive(Default)]
struct Records {
    entries: HashMap<RecordKey, Versioned<OtpRecord>>,
    revision: u64,
}

impl Records {
    fn write(&mut self, key: &RecordKey, record: &OtpRecord) -> Version {
        self.revision += 1;
        let version = Version::new(self.revision.to_string());
        self.entries.insert(
            key.clone(),
            Versioned {
                value: record.clone(),
                version: version.clone(),
            },
        );
        version
    }

    fn check(&self, key: &RecordKey, expected: &Version) -> Result<(), OtpStoreError> {
        match self.entries.get(key) {
            Some(current) if &current.version == expected => Ok(()),
            _ => Err(OtpStoreError::VersionConflict),
        }
    }
}

#[derive(Clone, Default)]
pub struct MockOtpStore {
    records: Arc<RwLock<Records>>,
}

impl MockOtpStore {
    pub async fn record(&self, key: &RecordKey) -> Option<OtpRecord> {
        self.records
            .read()
            .await
            .entries
            .get(key)
            .map(|versioned| versioned.value.clone())
    }
}

#[async_trait::async_trait]
impl OtpStore for MockOtpStore {
    async fn put(&self, key: &RecordKey, record: &OtpRecord) -> Result<Version, OtpStoreError> {
        Ok(self.records.write().await.write(key, record))
    }

    async fn get(&self, key: &RecordKey) -> Result<Option<Versioned<OtpRecord>>, OtpStoreError> {
        Ok(self.records.read().await.entries.get(key).cloned())
    }

    async fn replace(
        &self,
        key: &RecordKey,
        expected: &Version,
        record: &OtpRecord,
    ) -> Result<Version, OtpStoreError> {
        let mut records = self.records.write().await;
        records.check(key, expected)?;
        Ok(records.write(key, record))
    }

    async fn delete(&self, key: &RecordKey, expected: &Version) -> Result<(), OtpStoreError> {
        let mut records = self.records.write().await;
        records.check(key, expected)?;
        records.entries.remove(key);
        Ok(())
    }
}

/// Store whose every call fails as if the backend were down.
#[derive(Clone, Default)]
pub struct UnavailableOtpStore;

#[async_trait::async_trait]
impl OtpStore for UnavailableOtpStore {
    async fn put(&self, _key: &RecordKey, _record: &OtpRecord) -> Result<Version, OtpStoreError> {
        Err(OtpStoreError::Unavailable("connection refused".to_string()))
    }

    async fn get(&self, _key: &RecordKey) -> Result<Option<Versioned<OtpRecord>>, OtpStoreError> {
        Err(OtpStoreError::Unavailable("connection refused".to_string()))
    }

    async fn replace(
        &self,
        _key: &RecordKey,
        _expected: &Version,
        _record: &OtpRecord,
    ) -> Result<Version, OtpStoreError> {
        Err(OtpStoreError::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _key: &RecordKey, _expected: &Version) -> Result<(), OtpStoreError> {
        Err(OtpStoreError::Unavailable("connection refused".to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub text_body: String,
}

#[derive(Clone, Default)]
pub struct MockEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
    fail: bool,
}

impl MockEmailClient {
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        _html_body: &str,
        text_body: &str,
    ) -> Result<(), String> {
        if self.fail {
            return Err("mail server rejected the message".to_string());
        }

        self.sent.write().await.push(SentEmail {
            recipient: recipient.as_ref().expose_secret().clone(),
            subject: subject.to_string(),
            text_body: text_body.to_string(),
        });
        Ok(())
    }
}

/// Pulls the six digit code out of a plain text OTP email.
pub fn code_in(text_body: &str) -> String {
    text_body
        .split(|c: char| !c.is_ascii_digit())
        .find(|digits| digits.len() == kimun_core::OTP_LENGTH)
        .expect("email carries a six digit code")
        .to_string()
}
