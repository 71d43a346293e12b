use std::sync::Arc;

use kimun_adapters::{
    config::{EmailClientSetting, FirebaseSetting, RedisSetting},
    email::PostmarkEmailClient,
    persistence::{FirebaseOtpStore, RedisOtpStore},
};
use kimun_core::{Email, OtpError};
use redis::{Client, RedisResult};
use reqwest::Client as HttpClient;
use secrecy::Secret;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Invalid sender address: {0}")]
    InvalidSender(#[from] OtpError),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("Store backend `firebase` selected but `store.firebase` is not configured")]
    MissingFirebaseSetting,
}

/// Create a Redis client
///
/// # Arguments
/// * `redis_hostname` - Redis server hostname
pub fn get_redis_client(redis_hostname: &str) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}

/// Connect to Redis and wrap the connection in an OTP store
pub fn configure_redis_store(setting: &RedisSetting) -> Result<RedisOtpStore, BootstrapError> {
    let conn = get_redis_client(&setting.host_name)?.get_connection()?;
    Ok(RedisOtpStore::new(Arc::new(RwLock::new(conn))))
}

/// Build the realtime database store, sharing the configured HTTP timeout
pub fn configure_firebase_store(
    setting: Option<&FirebaseSetting>,
    email_setting: &EmailClientSetting,
) -> Result<FirebaseOtpStore, BootstrapError> {
    let setting = setting.ok_or(BootstrapError::MissingFirebaseSetting)?;
    let http_client = HttpClient::builder()
        .timeout(email_setting.timeout())
        .build()?;

    Ok(FirebaseOtpStore::new(
        setting.database_url.clone(),
        setting.auth_token.clone(),
        http_client,
    ))
}

pub fn configure_email_client(
    setting: &EmailClientSetting,
) -> Result<PostmarkEmailClient, BootstrapError> {
    let http_client = HttpClient::builder().timeout(setting.timeout()).build()?;

    Ok(PostmarkEmailClient::new(
        setting.base_url.clone(),
        Email::try_from(Secret::new(setting.sender.clone()))?,
        setting.auth_token.clone(),
        http_client,
    ))
}
