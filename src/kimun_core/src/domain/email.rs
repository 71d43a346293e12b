use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};

use super::otp_error::OtpError;

// local@domain.tld, no whitespace and a single '@'
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

/// A delegate email address that has passed the shape check.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    pub fn parse(email: Secret<String>) -> Result<Self, OtpError> {
        if EMAIL_SHAPE.is_match(email.expose_secret()) {
            Ok(Self(email))
        } else {
            Err(OtpError::InvalidEmail)
        }
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = OtpError;

    fn try_from(email: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(email)
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}
