//! Infrastructure adapters for the OTP service: stores, email clients,
//! axum routes and configuration.

pub mod config;
pub mod email;
pub mod http;
pub mod persistence;
