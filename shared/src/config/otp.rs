//! OTP lifecycle configuration

use serde::{Deserialize, Serialize};

/// Default time-to-live of an issued OTP
pub const DEFAULT_TTL_MINUTES: i64 = 10;

/// Default bound on a single mail or webhook delivery
pub const DEFAULT_DELIVERY_TIMEOUT_SECS: u64 = 10;

/// What a successful verification does to the stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VerificationPolicy {
    /// Flip the record to verified and keep it until the gated
    /// submission consumes it or it expires
    #[default]
    Defer,
    /// Delete the record as soon as the code matches
    Consume,
}

impl std::str::FromStr for VerificationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "defer" | "deferred" => Ok(VerificationPolicy::Defer),
            "consume" | "delete" => Ok(VerificationPolicy::Consume),
            _ => Err(format!("Invalid verification policy: {}", s)),
        }
    }
}

/// OTP issuance and verification settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Minutes an issued code stays valid
    pub ttl_minutes: i64,

    /// Success policy for `verify`
    pub policy: VerificationPolicy,

    /// Echo the generated code in the send-otp response (development only)
    pub dev_echo: bool,

    /// Seconds between expired-record sweeps; 0 disables the sweeper
    pub sweep_interval_secs: u64,

    /// Upper bound for one outbound mail delivery
    pub delivery_timeout_secs: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: DEFAULT_TTL_MINUTES,
            policy: VerificationPolicy::default(),
            dev_echo: false,
            sweep_interval_secs: 60,
            delivery_timeout_secs: DEFAULT_DELIVERY_TIMEOUT_SECS,
        }
    }
}
