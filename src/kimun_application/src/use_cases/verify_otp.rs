use kimun_core::{
    Clock, Email, OtpCode, OtpPolicy, OtpStore, OtpStoreError, RecordKey, Verdict, Versioned,
};

/// Number of read-evaluate-write rounds before a contended record is given up on.
const MAX_EVALUATION_ROUNDS: usize = 3;

/// Error types for verify OTP use case
#[derive(Debug, thiserror::Error)]
pub enum VerifyOtpError {
    #[error("OTP not found")]
    NotFound,
    #[error("Too many attempts")]
    TooManyAttempts,
    #[error("OTP expired")]
    Expired,
    #[error("Invalid OTP")]
    Mismatch,
    #[error("OTP store error: {0}")]
    StoreUnavailable(#[from] OtpStoreError),
}

/// Verify OTP use case - checks a candidate code against the stored record
pub struct VerifyOtpUseCase<S, C>
where
    S: OtpStore,
    C: Clock,
{
    otp_store: S,
    clock: C,
    policy: OtpPolicy,
}

impl<S, C> VerifyOtpUseCase<S, C>
where
    S: OtpStore,
    C: Clock,
{
    pub fn new(otp_store: S, clock: C, policy: OtpPolicy) -> Self {
        Self {
            otp_store,
            clock,
            policy,
        }
    }

    /// Execute the verify OTP use case
    ///
    /// Every write is conditional on the version that was read. When another
    /// request changed the record in between, the record is read again and
    /// the whole rule sequence re-applied.
    #[tracing::instrument(name = "VerifyOtpUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email, code: OtpCode) -> Result<(), VerifyOtpError> {
        let key = RecordKey::for_email(&email);

        for _ in 0..MAX_EVALUATION_ROUNDS {
            match self.evaluate_once(&key, &code).await {
                Err(VerifyOtpError::StoreUnavailable(OtpStoreError::VersionConflict)) => {
                    tracing::debug!("OTP record changed during verification, re-reading");
                }
                outcome => return outcome,
            }
        }

        tracing::warn!("OTP record kept changing during verification");
        Err(OtpStoreError::VersionConflict.into())
    }

    async fn evaluate_once(&self, key: &RecordKey, code: &OtpCode) -> Result<(), VerifyOtpError> {
        let Some(Versioned { value: record, version }) = self.otp_store.get(key).await? else {
            return Err(VerifyOtpError::NotFound);
        };

        match record.evaluate(code, self.clock.now(), &self.policy) {
            Verdict::TooManyAttempts => {
                self.otp_store.delete(key, &version).await?;
                tracing::info!("OTP invalidated after too many attempts");
                Err(VerifyOtpError::TooManyAttempts)
            }
            Verdict::Expired => {
                self.otp_store.delete(key, &version).await?;
                tracing::info!("Expired OTP removed");
                Err(VerifyOtpError::Expired)
            }
            Verdict::Mismatch { updated } => {
                self.otp_store.replace(key, &version, &updated).await?;
                tracing::info!(attempts = updated.attempts, "OTP mismatch");
                Err(VerifyOtpError::Mismatch)
            }
            Verdict::Accepted => {
                // Conditional delete: a code is consumed at most once
                self.otp_store.delete(key, &version).await?;
                tracing::info!("OTP verified");
                Ok(())
            }
        }
    }
}
