use std::fmt;

use secrecy::ExposeSecret;

use super::email::Email;

/// Collection under which OTP records are stored.
pub const OTP_COLLECTION: &str = "otps";

/// Store key derived from an email address. Realtime database keys may not
/// contain `.`, so every dot is replaced with a comma.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn for_email(email: &Email) -> Self {
        Self(email.as_ref().expose_secret().replace('.', ","))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full path of the record, e.g. `otps/a@b,com`.
    pub fn path(&self) -> String {
        format!("{OTP_COLLECTION}/{}", self.0)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
