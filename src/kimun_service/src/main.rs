use color_eyre::eyre::Result;
use kimun_adapters::{
    config::{AllowedOrigins, OtpServiceSetting, StoreBackend},
    email::PostmarkEmailClient,
    persistence::HashMapOtpStore,
};
use kimun_core::{OtpPolicy, OtpStore, SystemClock};
use kimun_service::{
    OtpService, configure_email_client, configure_firebase_store, configure_redis_store,
    init_tracing,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    // Load configuration
    let config = OtpServiceSetting::load()?;

    let email_client = configure_email_client(&config.email_client)?;
    let listener = TcpListener::bind(&config.application.address).await?;
    let allowed_origins = Some(config.application.allowed_origins.clone())
        .filter(|origins| !origins.is_empty());

    tracing::info!(backend = ?config.store.backend, "Starting OTP service");

    match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("In-memory OTP store selected; codes do not survive restarts");
            let store = HashMapOtpStore::new();
            serve(store, email_client, config.otp, listener, allowed_origins).await?
        }
        StoreBackend::Redis => {
            let store = configure_redis_store(&config.store.redis)?;
            serve(store, email_client, config.otp, listener, allowed_origins).await?
        }
        StoreBackend::Firebase => {
            let store =
                configure_firebase_store(config.store.firebase.as_ref(), &config.email_client)?;
            serve(store, email_client, config.otp, listener, allowed_origins).await?
        }
    }

    Ok(())
}

async fn serve<S>(
    otp_store: S,
    email_client: PostmarkEmailClient,
    policy: OtpPolicy,
    listener: TcpListener,
    allowed_origins: Option<AllowedOrigins>,
) -> std::io::Result<()>
where
    S: OtpStore + Clone + 'static,
{
    OtpService::new(otp_store, email_client, SystemClock, policy)
        .run_standalone(listener, allowed_origins)
        .await
}
