use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use kimun_application::IssueOtpUseCase;
use kimun_core::{Clock, Email, EmailClient, OtpPolicy, OtpStore};
use secrecy::Secret;
use serde::Deserialize;

use super::{SuccessResponse, error::OtpApiError};

#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub email: Secret<String>,
}

#[tracing::instrument(name = "Send OTP", skip_all)]
pub async fn send_otp<S, E, C>(
    State((otp_store, email_client, clock, policy)): State<(S, E, C, OtpPolicy)>,
    request: Result<Json<SendOtpRequest>, JsonRejection>,
) -> Result<impl IntoResponse, OtpApiError>
where
    S: OtpStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
    C: Clock + Clone + 'static,
{
    let Json(request) = request.map_err(|rejection| {
        tracing::debug!(%rejection, "Rejected send OTP payload");
        OtpApiError::InvalidEmail
    })?;

    let email = Email::try_from(request.email).map_err(|_| OtpApiError::InvalidEmail)?;

    let use_case = IssueOtpUseCase::new(otp_store, email_client, clock, policy);
    use_case.execute(email).await?;

    Ok((StatusCode::OK, Json(SuccessResponse::new())))
}
