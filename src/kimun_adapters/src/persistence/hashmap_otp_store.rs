use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use kimun_core::{OtpRecord, OtpStore, OtpStoreError, RecordKey, Version, Versioned};

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

    fn ensure_version(&self, key: &RecordKey, expected: &Version) -> Result<(), OtpStoreError> {
        match self.entries.get(key) {
            Some(current) if &current.version == expected => Ok(()),
            _ => Err(OtpStoreError::VersionConflict),
        }
    }
}

/// In-process store. Versions come from a revision counter shared by all keys.
#[derive(Default, Clone)]
pub struct HashMapOtpStore {
    records: Arc<RwLock<Records>>,
}

impl HashMapOtpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl OtpStore for HashMapOtpStore {
    async fn put(&self, key: &RecordKey, record: &OtpRecord) -> Result<Version, OtpStoreError> {
        let mut records = self.records.write().await;
        Ok(records.write(key, record))
    }

    async fn get(&self, key: &RecordKey) -> Result<Option<Versioned<OtpRecord>>, OtpStoreError> {
        let records = self.records.read().await;
        Ok(records.entries.get(key).cloned())
    }

    async fn replace(
        &self,
        key: &RecordKey,
        expected: &Version,
        record: &OtpRecord,
    ) -> Result<Version, OtpStoreError> {
        let mut records = self.records.write().await;
        records.ensure_version(key, expected)?;
        Ok(records.write(key, record))
    }

    async fn delete(&self, key: &RecordKey, expected: &Version) -> Result<(), OtpStoreError> {
        let mut records = self.records.write().await;
        records.ensure_version(key, expected)?;
        records.entries.remove(key);
        Ok(())
    }
}
