pub mod helpers;
pub mod otp_service;
pub mod telemetry;

pub use helpers::{
    BootstrapError, configure_email_client, configure_firebase_store, configure_redis_store,
    get_redis_client,
};
pub use otp_service::OtpService;
pub use telemetry::init_tracing;
