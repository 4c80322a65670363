//! OTP lifecycle: issue, verify, gate, status and consumption

use constant_time_eq::constant_time_eq;
use pa_shared::config::VerificationPolicy;
use pa_shared::utils::mask_email;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::entities::OtpRecord;
use crate::domain::value_objects::{DenyReason, GateDecision, OtpStatus, VerifiedGrant};
use crate::errors::{DeliveryError, DomainResult, OtpError, ValidationError};

use super::clock::{Clock, SystemClock};
use super::config::OtpServiceConfig;
use super::sweeper::OtpSweeper;
use super::traits::{MailerTrait, OtpStore, VerificationGate};
use super::types::{IssuedOtp, VerifiedOtp};

/// Name used in the OTP mail when the form did not provide one
pub const DEFAULT_DISPLAY_NAME: &str = "Patient";

/// Email OTP service
///
/// Every read-check-mutate sequence on a record runs inside one
/// [`OtpStore::update`] call. Mail delivery happens after the store write and
/// never while the store lock is held.
pub struct OtpService<S: OtpStore, M: MailerTrait> {
    store: Arc<S>,
    mailer: Arc<M>,
    clock: Arc<dyn Clock>,
    config: OtpServiceConfig,
}

impl<S: OtpStore, M: MailerTrait> OtpService<S, M> {
    /// Create a new OTP service on the wall clock
    pub fn new(store: Arc<S>, mailer: Arc<M>, config: OtpServiceConfig) -> Self {
        Self {
            store,
            mailer,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn mailer(&self) -> &Arc<M> {
        &self.mailer
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Issue a new OTP for `identity` and mail it
    ///
    /// Any previous record for the identity is overwritten, which invalidates
    /// its code immediately. When delivery fails or times out the new record
    /// stays in place; the user simply asks for another code.
    pub async fn issue(&self, identity: &str, display_name: Option<&str>) -> DomainResult<IssuedOtp> {
        let identity = identity.trim();
        if identity.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into());
        }

        let record = OtpRecord::issue(identity, self.clock.now(), self.config.ttl());
        let record_id = record.id;
        let code = record.code.clone();
        let expires_at = record.expires_at;

        let replaced = self.store.upsert(record);
        let masked = mask_email(identity);

        info!(
            identity = %masked,
            record_id = %record_id,
            replaced = replaced.is_some(),
            expires_at = %expires_at,
            event = "otp_issued",
            "Issued OTP"
        );
        if self.config.dev_echo {
            debug!(identity = %masked, code = %code, "Development OTP");
        }

        let name = display_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_DISPLAY_NAME);

        let delivery = tokio::time::timeout(
            self.config.delivery_timeout(),
            self.mailer
                .send_otp(identity, name, &code, self.config.ttl_minutes),
        )
        .await;

        let message_id = match delivery {
            Ok(Ok(message_id)) => message_id,
            Ok(Err(e)) => {
                error!(
                    identity = %masked,
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to send OTP mail"
                );
                return Err(DeliveryError::Mail { message: e }.into());
            }
            Err(_) => {
                error!(
                    identity = %masked,
                    timeout_secs = self.config.delivery_timeout_secs,
                    event = "otp_delivery_timeout",
                    "OTP mail delivery timed out"
                );
                return Err(DeliveryError::Timeout {
                    seconds: self.config.delivery_timeout_secs,
                }
                .into());
            }
        };

        info!(
            identity = %masked,
            message_id = %message_id,
            event = "otp_sent",
            "OTP mail sent"
        );

        Ok(IssuedOtp {
            identity: identity.to_string(),
            record_id,
            code,
            expires_at,
            message_id,
        })
    }

    /// Check a submitted code
    ///
    /// Checks run in a fixed order and the first match wins:
    /// missing record, expiry (record deleted), already verified,
    /// code mismatch (record kept), then success.
    pub fn verify(&self, identity: &str, submitted_code: &str) -> Result<VerifiedOtp, OtpError> {
        let identity = identity.trim();
        let submitted_code = submitted_code.trim();
        let now = self.clock.now();
        let policy = self.config.policy;

        let outcome = self.store.update(identity, |slot| {
            let (expired, verified, matches, record_id) = match slot.as_ref() {
                None => return Err(OtpError::NotFound),
                Some(record) => (
                    record.is_expired_at(now),
                    record.verified,
                    codes_match(&record.code, submitted_code),
                    record.id,
                ),
            };

            if expired {
                *slot = None;
                return Err(OtpError::Expired);
            }
            if verified {
                return Err(OtpError::AlreadyVerified);
            }
            if !matches {
                return Err(OtpError::Mismatch);
            }

            match policy {
                VerificationPolicy::Consume => {
                    *slot = None;
                    Ok((record_id, true))
                }
                VerificationPolicy::Defer => {
                    if let Some(record) = slot.as_mut() {
                        record.verified = true;
                    }
                    Ok((record_id, false))
                }
            }
        });

        let masked = mask_email(identity);
        match outcome {
            Ok((record_id, consumed)) => {
                info!(
                    identity = %masked,
                    record_id = %record_id,
                    consumed = consumed,
                    event = "otp_verified",
                    "OTP verified"
                );
                Ok(VerifiedOtp {
                    identity: identity.to_string(),
                    record_id,
                    verified_at: now,
                    consumed,
                })
            }
            Err(e) => {
                warn!(
                    identity = %masked,
                    reason = ?e,
                    event = "otp_verification_failed",
                    "OTP verification failed"
                );
                Err(e)
            }
        }
    }

    /// Decide whether `identity` may pass the gate
    ///
    /// Expiry is checked before the verified flag, so a verified but expired
    /// record is denied and removed.
    pub fn require_verified(&self, identity: &str) -> GateDecision {
        let identity = identity.trim();
        let now = self.clock.now();

        let decision = self.store.update(identity, |slot| {
            let (expired, verified, record_id) = match slot.as_ref() {
                None => return GateDecision::Deny(DenyReason::NoRecord),
                Some(record) => (record.is_expired_at(now), record.verified, record.id),
            };

            if expired {
                *slot = None;
                return GateDecision::Deny(DenyReason::Expired);
            }
            if !verified {
                return GateDecision::Deny(DenyReason::NotVerified);
            }

            GateDecision::Allow(VerifiedGrant {
                identity: identity.to_string(),
                record_id,
            })
        });

        if let GateDecision::Deny(reason) = &decision {
            debug!(
                identity = %mask_email(identity),
                reason = ?reason,
                event = "gate_denied",
                "Verification gate denied"
            );
        }
        decision
    }

    /// Report the OTP state of `identity`, removing the record if it has expired
    pub fn status(&self, identity: &str) -> OtpStatus {
        let identity = identity.trim();
        let now = self.clock.now();

        self.store.update(identity, |slot| {
            let (expired, verified) = match slot.as_ref() {
                None => return OtpStatus::absent(),
                Some(record) => (record.is_expired_at(now), record.verified),
            };

            if expired {
                *slot = None;
                OtpStatus::expired()
            } else {
                OtpStatus::pending(verified)
            }
        })
    }

    /// Delete the record a grant was issued for
    ///
    /// Returns false when the record is gone or was replaced by a newer issuance.
    pub fn consume(&self, grant: &VerifiedGrant) -> bool {
        let removed = self.store.update(&grant.identity, |slot| {
            if slot.as_ref().map_or(false, |r| r.id == grant.record_id) {
                *slot = None;
                true
            } else {
                false
            }
        });

        info!(
            identity = %mask_email(&grant.identity),
            record_id = %grant.record_id,
            removed = removed,
            event = "otp_consumed",
            "Consumed verified OTP"
        );
        removed
    }

    /// Atomically remove the verified record a grant was issued for
    ///
    /// The gate check is repeated under the store lock, so of two callers
    /// holding grants for the same record only one gets it back. The other
    /// is denied with the reason the record no longer qualifies.
    pub fn take_grant(&self, grant: &VerifiedGrant) -> Result<OtpRecord, DenyReason> {
        let now = self.clock.now();

        let taken = self.store.update(&grant.identity, |slot| {
            let (expired, verified, same_issuance) = match slot.as_ref() {
                None => return Err(DenyReason::NoRecord),
                Some(record) => (
                    record.is_expired_at(now),
                    record.verified,
                    record.id == grant.record_id,
                ),
            };

            if expired {
                *slot = None;
                return Err(DenyReason::Expired);
            }
            if !verified || !same_issuance {
                return Err(DenyReason::NotVerified);
            }
            slot.take().ok_or(DenyReason::NoRecord)
        });

        let masked = mask_email(&grant.identity);
        match &taken {
            Ok(record) => info!(
                identity = %masked,
                record_id = %record.id,
                event = "otp_claimed",
                "Claimed verified OTP for submission"
            ),
            Err(reason) => warn!(
                identity = %masked,
                record_id = %grant.record_id,
                reason = ?reason,
                event = "otp_claim_refused",
                "Verified OTP no longer available"
            ),
        }
        taken
    }

    /// Put back a record taken with [`Self::take_grant`]
    ///
    /// Only fills an empty slot or one still holding the same issuance; a
    /// record issued in the meantime wins.
    pub fn restore(&self, record: OtpRecord) -> bool {
        let record_id = record.id;
        let identity = record.identity.clone();

        let restored = self.store.update(&identity, |slot| {
            if slot.as_ref().map_or(true, |current| current.id == record_id) {
                *slot = Some(record);
                true
            } else {
                false
            }
        });

        info!(
            identity = %mask_email(&identity),
            record_id = %record_id,
            restored = restored,
            event = "otp_restored",
            "Returned verified OTP after failed submission"
        );
        restored
    }

    /// Remove every expired record; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        self.store.retain(|record| !record.is_expired_at(now))
    }

    /// Background sweeper sharing this service's store and clock
    pub fn sweeper(&self, interval_secs: u64) -> OtpSweeper<S> {
        OtpSweeper::new(Arc::clone(&self.store), self.clock(), interval_secs)
    }
}

impl<S: OtpStore, M: MailerTrait> VerificationGate for OtpService<S, M> {
    fn require_verified(&self, identity: &str) -> GateDecision {
        OtpService::require_verified(self, identity)
    }
}

/// Constant-time code comparison
fn codes_match(stored: &str, submitted: &str) -> bool {
    stored.len() == submitted.len() && constant_time_eq(stored.as_bytes(), submitted.as_bytes())
}
