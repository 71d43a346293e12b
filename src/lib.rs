//! # KIMUN - OTP Login Service Library
//!
//! This is a facade crate that re-exports all public APIs from the OTP service components.
//! Use this crate to get access to the whole login flow in one place.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `OtpCode`, `OtpRecord`, `RecordKey`, `OtpPolicy`
//! - **Ports**: `OtpStore`, `EmailClient`, `Clock`
//! - **Use cases**: `IssueOtpUseCase`, `VerifyOtpUseCase`
//! - **Adapters**: `HashMapOtpStore`, `RedisOtpStore`, `FirebaseOtpStore`, `PostmarkEmailClient`
//! - **Service**: `OtpService` - The main entry point for the OTP service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use kimun_core::*;
}

// Re-export most commonly used core types at the root level
pub use kimun_core::{
    Email, OtpCode, OtpError, OtpPolicy, OtpRecord, RecordKey, Verdict, Version, Versioned,
};

// ============================================================================
// Ports
// ============================================================================

pub use kimun_core::{Clock, EmailClient, ManualClock, OtpStore, OtpStoreError, SystemClock};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use kimun_application::*;
}

pub use kimun_application::{IssueOtpError, IssueOtpUseCase, VerifyOtpError, VerifyOtpUseCase};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use kimun_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use kimun_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use kimun_adapters::email::*;
    }

    /// Configuration
    pub mod config {
        pub use kimun_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use kimun_adapters::{
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{FirebaseOtpStore, HashMapOtpStore, RedisOtpStore},
};

// ============================================================================
// OTP Service (Main Entry Point)
// ============================================================================

/// Main OTP service
pub use kimun_service::{OtpService, get_redis_client, init_tracing};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
