use askama::Template;
use kimun_core::{OtpCode, OtpPolicy};

pub const OTP_EMAIL_SUBJECT: &str = "Your KIMUN login code";

#[derive(Template)]
#[template(path = "otp_email.html")]
struct OtpEmailHtml<'a> {
    code: &'a str,
    ttl_minutes: i64,
}

/// Rendered passcode email, ready for an [`kimun_core::EmailClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpEmail {
    pub subject: &'static str,
    pub html_body: String,
    pub text_body: String,
}

impl OtpEmail {
    pub fn render(code: &OtpCode, policy: &OtpPolicy) -> Result<Self, askama::Error> {
        let html_body = OtpEmailHtml {
            code: code.as_str(),
            ttl_minutes: policy.ttl_minutes(),
        }
        .render()?;

        let text_body = format!(
            "Your KIMUN login code is {}. It expires in {} minutes.",
            code.as_str(),
            policy.ttl_minutes()
        );

        Ok(Self {
            subject: OTP_EMAIL_SUBJECT,
            html_body,
            text_body,
        })
    }
}
