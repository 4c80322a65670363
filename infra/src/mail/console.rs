//! Mailer that writes to the log instead of a relay
//!
//! Used when no SMTP credentials are configured, typically in development.

use async_trait::async_trait;
use pa_shared::utils::mask_email;
use tracing::info;
use uuid::Uuid;

use pa_core::domain::entities::PreAuthClaim;
use pa_core::services::otp::MailerTrait;

#[derive(Debug, Clone, Default)]
pub struct ConsoleMailer {
    /// Include OTP codes in the log line
    show_codes: bool,
}

impl ConsoleMailer {
    pub fn new(show_codes: bool) -> Self {
        Self { show_codes }
    }
}

#[async_trait]
impl MailerTrait for ConsoleMailer {
    async fn send_otp(
        &self,
        to: &str,
        display_name: &str,
        code: &str,
        ttl_minutes: i64,
    ) -> Result<String, String> {
        let message_id = format!("console-{}", Uuid::new_v4());
        let shown = if self.show_codes { code } else { "******" };
        info!(
            to = %mask_email(to),
            display_name = display_name,
            code = shown,
            ttl_minutes = ttl_minutes,
            message_id = %message_id,
            "[console mail] OTP verification"
        );
        Ok(message_id)
    }

    async fn send_claim_receipt(&self, claim: &PreAuthClaim, reference: Uuid) -> Result<String, String> {
        let message_id = format!("console-{}", Uuid::new_v4());
        info!(
            to = %mask_email(&claim.email),
            reference = %reference,
            policy = %claim.policy_reference(),
            message_id = %message_id,
            "[console mail] Pre-authorization receipt"
        );
        Ok(message_id)
    }
}
