use std::time::Duration;

use axum::http::HeaderValue;
use config::{Config, ConfigError, Environment, File};
use kimun_core::OtpPolicy;
use secrecy::Secret;
use serde::Deserialize;

use super::constants::{CONFIG_FILE, env, prod};

/// Settings for the OTP service, layered from defaults, an optional
/// `config/base.json` and `KIMUN__*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct OtpServiceSetting {
    pub application: ApplicationSetting,
    #[serde(default)]
    pub otp: OtpPolicy,
    pub store: StoreSetting,
    pub email_client: EmailClientSetting,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSetting {
    pub address: String,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

/// Origins permitted to call the API from a browser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Redis,
    Firebase,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSetting {
    pub backend: StoreBackend,
    pub redis: RedisSetting,
    pub firebase: Option<FirebaseSetting>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSetting {
    pub host_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FirebaseSetting {
    pub database_url: String,
    pub auth_token: Option<Secret<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSetting {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl EmailClientSetting {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

impl OtpServiceSetting {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_file(CONFIG_FILE)
    }

    /// Loads settings with `path` as the optional file layer. Environment
    /// variables still take precedence.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("application.address", prod::APP_ADDRESS)?
            .set_default("store.backend", prod::store::BACKEND)?
            .set_default("store.redis.host_name", prod::store::REDIS_HOST_NAME)?
            .set_default("email_client.base_url", prod::email_client::BASE_URL)?
            .set_default("email_client.sender", prod::email_client::SENDER)?
            .set_default(
                "email_client.timeout_in_millis",
                prod::email_client::TIMEOUT_IN_MILLIS,
            )?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .prefix_separator(env::ENV_SEPARATOR)
                    .separator(env::ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("application.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
