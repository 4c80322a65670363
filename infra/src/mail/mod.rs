//! Mail Service Module
//!
//! Outbound mail for OTP codes and claim receipts:
//!
//! - **SMTP**: lettre async transport against the configured relay
//! - **Console**: log-only mailer used when no credentials are configured
//! - **Templates**: HTML bodies with escaped interpolation

pub mod console;
pub mod smtp;
pub mod templates;

pub use console::ConsoleMailer;
pub use smtp::SmtpMailer;

#[cfg(test)]
mod tests;

use std::time::Duration;

use pa_core::services::otp::MailerTrait;
use pa_shared::config::MailConfig;

/// Create a mailer based on configuration
///
/// Returns an SMTP mailer when credentials are present. Otherwise, or when
/// the relay cannot be set up, falls back to the console mailer.
pub fn create_mailer(config: &MailConfig, timeout: Duration, show_codes: bool) -> Box<dyn MailerTrait> {
    if !config.has_credentials() {
        tracing::warn!("EMAIL_USER/EMAIL_PASS not set; mail will be written to the log");
        return Box::new(ConsoleMailer::new(show_codes));
    }

    match SmtpMailer::new(config, timeout) {
        Ok(mailer) => {
            tracing::info!(host = %config.smtp_host, port = config.smtp_port, "SMTP mailer configured");
            Box::new(mailer)
        }
        Err(e) => {
            tracing::error!("Failed to initialize SMTP mailer: {}", e);
            tracing::warn!("Falling back to console mailer");
            Box::new(ConsoleMailer::new(show_codes))
        }
    }
}
