//! Traits for the OTP store, mail delivery and the verification gate

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{OtpRecord, PreAuthClaim};
use crate::domain::value_objects::GateDecision;

/// Keyed storage for OTP records, one record per identity
///
/// Implementations guard the whole map with a single lock. `update` and
/// `retain` run their closure while holding it, so a read-check-mutate
/// sequence for one identity is atomic. Closures must not block.
pub trait OtpStore: Send + Sync {
    /// Insert or overwrite the record for `record.identity`, returning the old one
    fn upsert(&self, record: OtpRecord) -> Option<OtpRecord>;

    /// Run `f` on the slot for `identity`; setting the slot to `None` deletes the record
    fn update<R, F>(&self, identity: &str, f: F) -> R
    where
        F: FnOnce(&mut Option<OtpRecord>) -> R;

    /// Keep only records for which `keep` returns true; returns how many were removed
    fn retain<F>(&self, keep: F) -> usize
    where
        F: FnMut(&OtpRecord) -> bool;

    /// Snapshot of the record for `identity`
    fn get(&self, identity: &str) -> Option<OtpRecord> {
        self.update(identity, |slot| slot.clone())
    }

    /// Number of stored records
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trait for outbound mail integration
#[async_trait]
pub trait MailerTrait: Send + Sync {
    /// Send an OTP mail; returns the relay's message id
    async fn send_otp(
        &self,
        to: &str,
        display_name: &str,
        code: &str,
        ttl_minutes: i64,
    ) -> Result<String, String>;

    /// Send the submission confirmation to the claimant
    async fn send_claim_receipt(&self, claim: &PreAuthClaim, reference: Uuid) -> Result<String, String>;
}

#[async_trait]
impl<T: MailerTrait + ?Sized> MailerTrait for Box<T> {
    async fn send_otp(
        &self,
        to: &str,
        display_name: &str,
        code: &str,
        ttl_minutes: i64,
    ) -> Result<String, String> {
        (**self).send_otp(to, display_name, code, ttl_minutes).await
    }

    async fn send_claim_receipt(&self, claim: &PreAuthClaim, reference: Uuid) -> Result<String, String> {
        (**self).send_claim_receipt(claim, reference).await
    }
}

/// Object-safe view of the gate, for middleware that cannot carry the
/// service's generic parameters
pub trait VerificationGate: Send + Sync {
    fn require_verified(&self, identity: &str) -> GateDecision;
}
