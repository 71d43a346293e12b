use std::sync::Arc;

use kimun_core::{OtpRecord, OtpStore, OtpStoreError, RecordKey, Version, Versioned};
use redis::{Commands, Connection};
use tokio::sync::RwLock;

/// Redis-backed store. The serialized record doubles as its version, and
/// conditional writes use WATCH/MULTI so a concurrent writer aborts them.
#[derive(Clone)]
pub struct RedisOtpStore {
    conn: Arc<RwLock<Connection>>,
}

impl RedisOtpStore {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl OtpStore for RedisOtpStore {
    async fn put(&self, key: &RecordKey, record: &OtpRecord) -> Result<Version, OtpStoreError> {
        let payload = serialize(record)?;

        let mut conn = self.conn.write().await;
        let _: () = conn.set(key.path(), &payload).map_err(unavailable)?;

        Ok(Version::new(payload))
    }

    async fn get(&self, key: &RecordKey) -> Result<Option<Versioned<OtpRecord>>, OtpStoreError> {
        let mut conn = self.conn.write().await;
        let payload: Option<String> = conn.get(key.path()).map_err(unavailable)?;

        payload
            .map(|payload| {
                Ok(Versioned {
                    value: deserialize(&payload)?,
                    version: Version::new(payload),
                })
            })
            .transpose()
    }

    async fn replace(
        &self,
        key: &RecordKey,
        expected: &Version,
        record: &OtpRecord,
    ) -> Result<Version, OtpStoreError> {
        let payload = serialize(record)?;
        let path = key.path();

        let mut conn = self.conn.write().await;
        watch_expecting(&mut conn, &path, expected)?;

        let committed: Option<()> = redis::pipe()
            .atomic()
            .set(&path, &payload)
            .ignore()
            .query(&mut *conn)
            .map_err(unavailable)?;

        committed
            .map(|()| Version::new(payload))
            .ok_or(OtpStoreError::VersionConflict)
    }

    async fn delete(&self, key: &RecordKey, expected: &Version) -> Result<(), OtpStoreError> {
        let path = key.path();

        let mut conn = self.conn.write().await;
        watch_expecting(&mut conn, &path, expected)?;

        let committed: Option<()> = redis::pipe()
            .atomic()
            .del(&path)
            .ignore()
            .query(&mut *conn)
            .map_err(unavailable)?;

        committed.ok_or(OtpStoreError::VersionConflict)
    }
}

/// WATCHes `path` and checks it still holds the expected payload. The watch
/// is released again when the check fails.
fn watch_expecting(
    conn: &mut Connection,
    path: &str,
    expected: &Version,
) -> Result<(), OtpStoreError> {
    redis::cmd("WATCH")
        .arg(path)
        .query::<()>(conn)
        .map_err(unavailable)?;

    let current: Option<String> = conn.get(path).map_err(unavailable)?;
    if current.as_deref() == Some(expected.as_str()) {
        return Ok(());
    }

    redis::cmd("UNWATCH")
        .query::<()>(conn)
        .map_err(unavailable)?;
    Err(OtpStoreError::VersionConflict)
}

fn serialize(record: &OtpRecord) -> Result<String, OtpStoreError> {
    serde_json::to_string(record).map_err(|e| OtpStoreError::MalformedRecord(e.to_string()))
}

fn deserialize(payload: &str) -> Result<OtpRecord, OtpStoreError> {
    serde_json::from_str(payload).map_err(|e| OtpStoreError::MalformedRecord(e.to_string()))
}

fn unavailable(error: redis::RedisError) -> OtpStoreError {
    OtpStoreError::Unavailable(error.to_string())
}
