//! Configuration for the OTP service

use chrono::Duration;
use pa_shared::config::{OtpConfig, VerificationPolicy, DEFAULT_DELIVERY_TIMEOUT_SECS, DEFAULT_TTL_MINUTES};

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Minutes before an issued code expires
    pub ttl_minutes: i64,
    /// What a successful verification does to the record
    pub policy: VerificationPolicy,
    /// Log generated codes at debug level and hand them back to the caller for echoing
    pub dev_echo: bool,
    /// Upper bound for the OTP mail delivery
    pub delivery_timeout_secs: u64,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: DEFAULT_TTL_MINUTES,
            policy: VerificationPolicy::Defer,
            dev_echo: false,
            delivery_timeout_secs: DEFAULT_DELIVERY_TIMEOUT_SECS,
        }
    }
}

impl OtpServiceConfig {
    pub fn ttl(&self) -> Duration {
        Duration::minutes(self.ttl_minutes)
    }

    pub fn delivery_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.delivery_timeout_secs)
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            ttl_minutes: config.ttl_minutes,
            policy: config.policy,
            dev_echo: config.dev_echo,
            delivery_timeout_secs: config.delivery_timeout_secs,
        }
    }
}
