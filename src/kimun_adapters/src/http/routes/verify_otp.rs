use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use kimun_application::VerifyOtpUseCase;
use kimun_core::{Clock, Email, OtpCode, OtpPolicy, OtpStore};
use secrecy::Secret;
use serde::Deserialize;

use super::{SuccessResponse, error::OtpApiError};

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: Secret<String>,
    pub otp: String,
}

#[tracing::instrument(name = "Verify OTP", skip_all)]
pub async fn verify_otp<S, C>(
    State((otp_store, clock, policy)): State<(S, C, OtpPolicy)>,
    request: Result<Json<VerifyOtpRequest>, JsonRejection>,
) -> Result<impl IntoResponse, OtpApiError>
where
    S: OtpStore + Clone + 'static,
    C: Clock + Clone + 'static,
{
    let Json(request) = request.map_err(|rejection| {
        tracing::debug!(%rejection, "Rejected verify OTP payload");
        OtpApiError::InvalidEmailOrOtp
    })?;

    // Parse domain entities
    let email = Email::try_from(request.email).map_err(|_| OtpApiError::InvalidEmailOrOtp)?;
    let code = OtpCode::parse(request.otp).map_err(|_| OtpApiError::InvalidEmailOrOtp)?;

    let use_case = VerifyOtpUseCase::new(otp_store, clock, policy);
    use_case.execute(email, code).await?;

    Ok((StatusCode::OK, Json(SuccessResponse::new())))
}
