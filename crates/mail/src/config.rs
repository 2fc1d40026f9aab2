//! SMTP sender configuration.

use crate::error::MailError;

/// Default SMTP relay. App passwords are the usual credential for it.
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Configuration for the SMTP mail service.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Display name in the `From` header.
    pub from_name: String,
    /// RFC 5322 address in the `From` header; also the SMTP username.
    pub from_address: String,
    /// SMTP password (an app password for hosted providers).
    pub app_password: String,
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port.
    pub smtp_port: u16,
    /// Where recipients can ask for help; rendered into templates.
    pub support_link: String,
}

impl MailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable            | Required | Default          |
    /// |---------------------|----------|------------------|
    /// | `MAIL_FROM_NAME`    | yes      | --               |
    /// | `MAIL_FROM_ADDRESS` | yes      | --               |
    /// | `MAIL_APP_PASSWORD` | yes      | --               |
    /// | `MAIL_SMTP_HOST`    | no       | `smtp.gmail.com` |
    /// | `MAIL_SMTP_PORT`    | no       | `587`            |
    /// | `MAIL_SUPPORT_LINK` | no       | empty            |
    pub fn from_env() -> Result<Self, MailError> {
        let smtp_port = match std::env::var("MAIL_SMTP_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| MailError::Config(format!("MAIL_SMTP_PORT is not a port: {raw}")))?,
            Err(_) => DEFAULT_SMTP_PORT,
        };

        Ok(Self {
            from_name: required("MAIL_FROM_NAME")?,
            from_address: required("MAIL_FROM_ADDRESS")?,
            app_password: required("MAIL_APP_PASSWORD")?,
            smtp_host: std::env::var("MAIL_SMTP_HOST")
                .unwrap_or_else(|_| DEFAULT_SMTP_HOST.to_string()),
            smtp_port,
            support_link: std::env::var("MAIL_SUPPORT_LINK").unwrap_or_default(),
        })
    }
}

fn required(name: &str) -> Result<String, MailError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(MailError::Config(format!("{name} must be set"))),
    }
}
