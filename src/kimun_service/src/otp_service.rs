use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post},
};
use kimun_adapters::{
    config::AllowedOrigins,
    http::routes::{health_check, send_otp, verify_otp},
};
use kimun_core::{Clock, EmailClient, OtpPolicy, OtpStore};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::telemetry::{make_span_with_request_id, on_request, on_response};

/// OTP login service exposing the send and verify endpoints
pub struct OtpService {
    router: Router,
}

impl OtpService {
    /// Create a new OtpService with the provided store, email client and clock
    ///
    /// # Arguments
    /// * `otp_store` - Store holding one OTP record per email (must be Clone)
    /// * `email_client` - Client delivering the passcode email (must be Clone)
    /// * `clock` - Time source for expiry (must be Clone)
    /// * `policy` - Code lifetime and attempt ceiling
    ///
    /// # Note on Architecture
    /// Stores and clients implement Clone via internal Arc for thread-safe sharing.
    /// Each route is given only the state it needs.
    pub fn new<S, E, C>(otp_store: S, email_client: E, clock: C, policy: OtpPolicy) -> Self
    where
        S: OtpStore + Clone + 'static,
        E: EmailClient + Clone + 'static,
        C: Clock + Clone + 'static,
    {
        let router = Router::new()
            .route("/health", get(health_check))
            // Issuing needs the store, the email client and the clock
            .route("/api/send-otp", post(send_otp::<S, E, C>))
            .with_state((otp_store.clone(), email_client, clock.clone(), policy))
            // Verifying never sends email
            .route("/api/verify-otp", post(verify_otp::<S, C>))
            .with_state((otp_store, clock, policy));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the OtpService into a router that can be mounted on another router
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([axum::http::header::CONTENT_TYPE])
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the OTP service as a standalone server until ctrl-c is received
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("OTP service listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
