//! SMTP mailer built on lettre's async transport

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{debug, error};
use uuid::Uuid;

use pa_core::domain::entities::PreAuthClaim;
use pa_core::services::otp::MailerTrait;
use pa_shared::config::MailConfig;
use pa_shared::utils::mask_email;

use super::templates;
use crate::InfrastructureError;

/// Display name on outgoing mail
const SENDER_NAME: &str = "Pre-Authorization Desk";

/// Sends OTP and receipt mail through an authenticated SMTP relay
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the relay transport
    ///
    /// Port 465 uses implicit TLS; any other port upgrades with STARTTLS.
    pub fn new(config: &MailConfig, timeout: Duration) -> Result<Self, InfrastructureError> {
        let (username, password) = match (&config.username, &config.password) {
            (Some(user), Some(pass)) if config.has_credentials() => (user.clone(), pass.clone()),
            _ => {
                return Err(InfrastructureError::Config(
                    "EMAIL_USER and EMAIL_PASS are required for SMTP delivery".to_string(),
                ))
            }
        };

        let sender = config
            .sender()
            .ok_or_else(|| InfrastructureError::Config("No sender address configured".to_string()))?;
        let from = Mailbox::new(Some(SENDER_NAME.to_string()), sender.parse()?);

        let builder = if config.smtp_port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        };

        let transport = builder
            .port(config.smtp_port)
            .credentials(Credentials::new(username, password))
            .timeout(Some(timeout))
            .build();

        Ok(Self { transport, from })
    }

    async fn send_html(&self, to: &str, subject: &str, body: String) -> Result<String, InfrastructureError> {
        let message_id = format!("<{}@preauth>", Uuid::new_v4());
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(subject)
            .message_id(Some(message_id.clone()))
            .header(ContentType::TEXT_HTML)
            .body(body)?;

        let response = self.transport.send(message).await?;
        debug!(
            to = %mask_email(to),
            code = %response.code(),
            "SMTP relay accepted message"
        );
        Ok(message_id)
    }
}

#[async_trait]
impl MailerTrait for SmtpMailer {
    async fn send_otp(
        &self,
        to: &str,
        display_name: &str,
        code: &str,
        ttl_minutes: i64,
    ) -> Result<String, String> {
        let body = templates::otp_body(display_name, code, ttl_minutes);
        self.send_html(to, templates::OTP_SUBJECT, body)
            .await
            .map_err(|e| {
                error!(to = %mask_email(to), error = %e, "SMTP delivery of OTP failed");
                e.to_string()
            })
    }

    async fn send_claim_receipt(&self, claim: &PreAuthClaim, reference: Uuid) -> Result<String, String> {
        let body = templates::receipt_body(claim, reference);
        self.send_html(claim.identity(), templates::RECEIPT_SUBJECT, body)
            .await
            .map_err(|e| {
                error!(to = %mask_email(claim.identity()), error = %e, "SMTP delivery of receipt failed");
                e.to_string()
            })
    }
}
