use kimun_core::{OTP_COLLECTION, OtpRecord, OtpStore, OtpStoreError, RecordKey, Version, Versioned};
use reqwest::{
    Client, Response, StatusCode, Url,
    header::{ETAG, IF_MATCH},
};
use secrecy::{ExposeSecret, Secret};

/// Store backed by the Firebase Realtime Database REST API.
///
/// Every request asks for the record's ETag; conditional writes send it back
/// in `if-match` and the database answers `412` when the record moved on.
#[derive(Clone)]
pub struct FirebaseOtpStore {
    http_client: Client,
    database_url: String,
    auth_token: Option<Secret<String>>,
}

impl FirebaseOtpStore {
    pub fn new(
        database_url: String,
        auth_token: Option<Secret<String>>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            database_url,
            auth_token,
        }
    }

    fn record_url(&self, key: &RecordKey) -> Result<Url, OtpStoreError> {
        let mut url = Url::parse(&self.database_url)
            .map_err(|e| OtpStoreError::Unavailable(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|()| OtpStoreError::Unavailable("database URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(OTP_COLLECTION)
            .push(&format!("{key}.json"));

        if let Some(token) = &self.auth_token {
            url.query_pairs_mut()
                .append_pair(AUTH_QUERY_PARAM, token.expose_secret());
        }

        Ok(url)
    }
}

#[async_trait::async_trait]
impl OtpStore for FirebaseOtpStore {
    #[tracing::instrument(name = "Firebase put", skip_all)]
    async fn put(&self, key: &RecordKey, record: &OtpRecord) -> Result<Version, OtpStoreError> {
        let response = self
            .http_client
            .put(self.record_url(key)?)
            .header(ETAG_REQUEST_HEADER, "true")
            .json(record)
            .send()
            .await
            .map_err(unavailable)?;

        etag(&check_status(response)?)
    }

    #[tracing::instrument(name = "Firebase get", skip_all)]
    async fn get(&self, key: &RecordKey) -> Result<Option<Versioned<OtpRecord>>, OtpStoreError> {
        let response = self
            .http_client
            .get(self.record_url(key)?)
            .header(ETAG_REQUEST_HEADER, "true")
            .send()
            .await
            .map_err(unavailable)?;

        let response = check_status(response)?;
        let version = etag(&response)?;

        // An absent record comes back as a JSON `null`
        let record: Option<OtpRecord> = response
            .json()
            .await
            .map_err(|e| OtpStoreError::MalformedRecord(e.without_url().to_string()))?;

        Ok(record.map(|value| Versioned { value, version }))
    }

    #[tracing::instrument(name = "Firebase conditional put", skip_all)]
    async fn replace(
        &self,
        key: &RecordKey,
        expected: &Version,
        record: &OtpRecord,
    ) -> Result<Version, OtpStoreError> {
        let response = self
            .http_client
            .put(self.record_url(key)?)
            .header(ETAG_REQUEST_HEADER, "true")
            .header(IF_MATCH, expected.as_str())
            .json(record)
            .send()
            .await
            .map_err(unavailable)?;

        etag(&check_status(response)?)
    }

    #[tracing::instrument(name = "Firebase conditional delete", skip_all)]
    async fn delete(&self, key: &RecordKey, expected: &Version) -> Result<(), OtpStoreError> {
        let response = self
            .http_client
            .delete(self.record_url(key)?)
            .header(ETAG_REQUEST_HEADER, "true")
            .header(IF_MATCH, expected.as_str())
            .send()
            .await
            .map_err(unavailable)?;

        check_status(response)?;
        Ok(())
    }
}

const ETAG_REQUEST_HEADER: &str = "X-Firebase-ETag";
const AUTH_QUERY_PARAM: &str = "auth";

fn check_status(response: Response) -> Result<Response, OtpStoreError> {
    if response.status() == StatusCode::PRECONDITION_FAILED {
        return Err(OtpStoreError::VersionConflict);
    }
    response.error_for_status().map_err(unavailable)
}

fn etag(response: &Response) -> Result<Version, OtpStoreError> {
    response
        .headers()
        .get(ETAG)
        .and_then(|value| value.to_str().ok())
        .map(Version::new)
        .ok_or_else(|| OtpStoreError::Unavailable("response carried no ETag".to_string()))
}

// The request URL carries the auth token in its query
fn unavailable(error: reqwest::Error) -> OtpStoreError {
    OtpStoreError::Unavailable(error.without_url().to_string())
}
