use kimun_core::{
    Clock, Email, EmailClient, OtpCode, OtpPolicy, OtpRecord, OtpStore, OtpStoreError, RecordKey,
};

use crate::messages::OtpEmail;

/// Error types specific to the issue OTP use case
#[derive(Debug, thiserror::Error)]
pub enum IssueOtpError {
    #[error("OTP store error: {0}")]
    StoreUnavailable(#[from] OtpStoreError),
    #[error("Failed to send email: {0}")]
    NotificationFailed(String),
}

/// Issue OTP use case - generates, persists and emails a passcode
pub struct IssueOtpUseCase<S, E, C>
where
    S: OtpStore,
    E: EmailClient,
    C: Clock,
{
    otp_store: S,
    email_client: E,
    clock: C,
    policy: OtpPolicy,
}

impl<S, E, C> IssueOtpUseCase<S, E, C>
where
    S: OtpStore,
    E: EmailClient,
    C: Clock,
{
    pub fn new(otp_store: S, email_client: E, clock: C, policy: OtpPolicy) -> Self {
        Self {
            otp_store,
            email_client,
            clock,
            policy,
        }
    }

    /// Execute the issue OTP use case
    ///
    /// # Arguments
    /// * `email` - Address the code is stored under and sent to
    ///
    /// # Returns
    /// Ok(()) once the code is stored and the email accepted by the mail
    /// provider. The code itself is never returned.
    #[tracing::instrument(name = "IssueOtpUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<(), IssueOtpError> {
        let key = RecordKey::for_email(&email);
        let code = OtpCode::generate();

        let message = OtpEmail::render(&code, &self.policy)
            .map_err(|e| IssueOtpError::NotificationFailed(e.to_string()))?;

        // Overwrites any earlier code for this address
        let record = OtpRecord::issue(code, self.clock.now(), &self.policy);
        let version = self.otp_store.put(&key, &record).await?;

        if let Err(e) = self
            .email_client
            .send_email(&email, message.subject, &message.html_body, &message.text_body)
            .await
        {
            // Only remove the code we wrote; a newer issuance must survive.
            match self.otp_store.delete(&key, &version).await {
                Ok(()) => tracing::info!("Removed undelivered OTP record"),
                Err(rollback_error) => {
                    tracing::warn!(error = %rollback_error, "Could not remove undelivered OTP record")
                }
            }
            return Err(IssueOtpError::NotificationFailed(e));
        }

        tracing::info!("OTP issued");
        Ok(())
    }
}
