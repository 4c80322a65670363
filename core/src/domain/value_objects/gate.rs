//! Outcome of asking whether an identity may proceed past the OTP gate.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Proof that an identity held a verified, unexpired OTP when the gate was checked
///
/// The grant is bound to one issuance through `record_id`; consuming it never
/// removes a record issued afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedGrant {
    pub identity: String,
    pub record_id: Uuid,
}

/// Why the gate refused an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// No OTP was ever issued, or it was already consumed
    NoRecord,
    /// The OTP expired; the record has been removed
    Expired,
    /// An OTP exists but was never verified
    NotVerified,
}

impl DenyReason {
    /// Message suitable for the form
    pub fn message(&self) -> &'static str {
        match self {
            DenyReason::NoRecord => "Please verify your email with an OTP before submitting.",
            DenyReason::Expired => "OTP has expired. Please request a new one.",
            DenyReason::NotVerified => "Email not verified. Please verify your OTP first.",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Decision returned by the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow(VerifiedGrant),
    Deny(DenyReason),
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allow(_))
    }

    /// Convert into a `Result`, keeping the grant or the reason
    pub fn into_result(self) -> Result<VerifiedGrant, DenyReason> {
        match self {
            GateDecision::Allow(grant) => Ok(grant),
            GateDecision::Deny(reason) => Err(reason),
        }
    }
}
