//! Types for OTP service results

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Result of issuing an OTP
///
/// Carries the code so the API layer can echo it in development; it is never
/// serialized as-is.
#[derive(Debug, Clone)]
pub struct IssuedOtp {
    pub identity: String,
    pub record_id: Uuid,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    /// Message id reported by the mail relay
    pub message_id: String,
}

/// Result of a successful verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedOtp {
    pub identity: String,
    pub record_id: Uuid,
    pub verified_at: DateTime<Utc>,
    /// True when the record was deleted on success rather than kept for the gate
    pub consumed: bool,
}
