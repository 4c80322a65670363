//! Claim submission service

use chrono::Utc;
use pa_shared::utils::mask_email;
use pa_shared::utils::validation::Validate;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::entities::PreAuthClaim;
use crate::domain::value_objects::{DenyReason, VerifiedGrant};
use crate::errors::{DeliveryError, DomainError, DomainResult};
use crate::services::otp::{MailerTrait, OtpService, OtpStore};

use super::config::ClaimServiceConfig;
use super::traits::ClaimForwarderTrait;
use super::types::{ForwardOutcome, SubmissionReceipt};

/// Accepts claims from identities that passed the OTP gate
pub struct ClaimSubmissionService<S: OtpStore, M: MailerTrait, F: ClaimForwarderTrait> {
    otp_service: Arc<OtpService<S, M>>,
    forwarder: Arc<F>,
    config: ClaimServiceConfig,
}

impl<S: OtpStore, M: MailerTrait, F: ClaimForwarderTrait> ClaimSubmissionService<S, M, F> {
    pub fn new(otp_service: Arc<OtpService<S, M>>, forwarder: Arc<F>, config: ClaimServiceConfig) -> Self {
        Self {
            otp_service,
            forwarder,
            config,
        }
    }

    /// Submit a claim on the strength of `grant`
    ///
    /// 1. Validates the claim fields
    /// 2. Checks the grant belongs to the claim's email
    /// 3. Takes the verified OTP record, so a concurrent submission is denied
    /// 4. Mails the confirmation (failure puts the record back)
    /// 5. Forwards to the webhook; a failure is logged and otherwise ignored
    pub async fn submit(&self, claim: PreAuthClaim, grant: VerifiedGrant) -> DomainResult<SubmissionReceipt> {
        if let Err(errors) = claim.validate() {
            warn!(
                fields = ?errors.to_field_errors().keys().collect::<Vec<_>>(),
                event = "claim_invalid",
                "Rejected claim with invalid fields"
            );
            return Err(DomainError::InvalidClaim {
                fields: errors.to_field_errors(),
            });
        }

        if claim.identity() != grant.identity {
            warn!(
                claim_email = %mask_email(claim.identity()),
                grant_email = %mask_email(&grant.identity),
                event = "claim_identity_mismatch",
                "Claim email does not match the verified email"
            );
            return Err(DomainError::GateDenied(DenyReason::NotVerified));
        }

        let record = self.otp_service.take_grant(&grant).map_err(DomainError::GateDenied)?;

        let reference = Uuid::new_v4();
        let masked = mask_email(&grant.identity);

        let message_id = match self.send_receipt(&claim, reference).await {
            Ok(message_id) => message_id,
            Err(e) => {
                self.otp_service.restore(record);
                return Err(e.into());
            }
        };
        info!(identity = %masked, reference = %reference, message_id = %message_id, "Claim receipt mailed");

        let forwarded = self.forward(&claim, reference).await;

        info!(
            identity = %masked,
            reference = %reference,
            forwarded = forwarded,
            event = "claim_submitted",
            "Pre-authorization claim submitted"
        );

        Ok(SubmissionReceipt {
            reference,
            submitted_at: Utc::now(),
            forwarded,
        })
    }

    /// Confirmation mail to the claimant, bounded by the delivery timeout
    async fn send_receipt(&self, claim: &PreAuthClaim, reference: Uuid) -> Result<String, DeliveryError> {
        let masked = mask_email(claim.identity());
        let receipt = tokio::time::timeout(
            std::time::Duration::from_secs(self.config.delivery_timeout_secs),
            self.otp_service.mailer().send_claim_receipt(claim, reference),
        )
        .await;

        match receipt {
            Ok(Ok(message_id)) => Ok(message_id),
            Ok(Err(e)) => {
                error!(identity = %masked, error = %e, event = "receipt_delivery_failed", "Failed to send claim receipt");
                Err(DeliveryError::Mail { message: e })
            }
            Err(_) => {
                error!(identity = %masked, event = "receipt_delivery_timeout", "Claim receipt delivery timed out");
                Err(DeliveryError::Timeout {
                    seconds: self.config.delivery_timeout_secs,
                })
            }
        }
    }

    /// Best-effort webhook delivery; returns whether the claim was delivered
    async fn forward(&self, claim: &PreAuthClaim, reference: Uuid) -> bool {
        let outcome = tokio::time::timeout(
            std::time::Duration::from_secs(self.config.webhook_timeout_secs),
            self.forwarder.forward(claim, reference),
        )
        .await;

        let failure = match outcome {
            Ok(Ok(ForwardOutcome::Delivered)) => return true,
            Ok(Ok(ForwardOutcome::Disabled)) => return false,
            Ok(Err(e)) => DeliveryError::Webhook { message: e },
            Err(_) => DeliveryError::Timeout {
                seconds: self.config.webhook_timeout_secs,
            },
        };

        warn!(
            reference = %reference,
            error = %failure,
            event = "webhook_failed",
            "Claim webhook delivery failed; continuing"
        );
        false
    }
}
