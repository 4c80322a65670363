//! One-time password record bound to an email identity.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of an OTP code
pub const CODE_LENGTH: usize = 6;

/// Smallest code ever generated; codes never start with a zero
pub const CODE_MIN: u32 = 100_000;

/// Largest code ever generated
pub const CODE_MAX: u32 = 999_999;

/// A pending or verified OTP for one email identity
///
/// At most one record exists per identity. The code is only ever compared,
/// never handed back to a verifying caller.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Per-issuance identifier; a resend produces a new one
    pub id: Uuid,

    /// Email address the code was sent to
    pub identity: String,

    /// The 6-digit code
    pub code: String,

    /// Timestamp when the code was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp after which the code is no longer accepted
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been matched
    pub verified: bool,
}

impl OtpRecord {
    /// Issue a fresh record with a random code valid for `ttl` from `now`
    pub fn issue(identity: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self::with_code(identity, Self::generate_code(), now, ttl)
    }

    /// Build a record around a known code
    pub fn with_code(
        identity: impl Into<String>,
        code: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity: identity.into(),
            code: code.into(),
            created_at: now,
            expires_at: now + ttl,
            verified: false,
        }
    }

    /// Draw a code uniformly from 100000..=999999 using the OS RNG
    pub fn generate_code() -> String {
        OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }

    /// A record is expired once `now` is strictly past `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Time left before expiry, zero once expired
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

// The code stays out of debug output so records can be logged safely.
impl std::fmt::Debug for OtpRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpRecord")
            .field("id", &self.id)
            .field("identity", &self.identity)
            .field("code", &"******")
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .field("verified", &self.verified)
            .finish()
    }
}
