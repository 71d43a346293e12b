pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AllowedOrigins, ApplicationSetting, EmailClientSetting, FirebaseSetting, OtpServiceSetting,
    RedisSetting, StoreBackend, StoreSetting,
};
