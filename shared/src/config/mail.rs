//! Outbound mail configuration

use serde::{Deserialize, Serialize};

/// SMTP account used for OTP and receipt mails
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MailConfig {
    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP port (465 = implicit TLS)
    pub smtp_port: u16,

    /// Account user name, usually the sender address
    pub username: Option<String>,

    /// Account password or app password
    pub password: Option<String>,

    /// Sender address; falls back to `username`
    pub from_address: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::from("smtp.gmail.com"),
            smtp_port: 465,
            username: None,
            password: None,
            from_address: None,
        }
    }
}

impl MailConfig {
    /// Whether enough credentials are present to talk to a real relay
    pub fn has_credentials(&self) -> bool {
        matches!(
            (&self.username, &self.password),
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty()
        )
    }

    /// Effective sender address
    pub fn sender(&self) -> Option<&str> {
        self.from_address
            .as_deref()
            .or(self.username.as_deref())
            .filter(|s| !s.is_empty())
    }
}
