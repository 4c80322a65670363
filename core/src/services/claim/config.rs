//! Configuration for the claim submission service

use pa_shared::config::DEFAULT_DELIVERY_TIMEOUT_SECS;

#[derive(Debug, Clone)]
pub struct ClaimServiceConfig {
    /// Upper bound for the receipt mail
    pub delivery_timeout_secs: u64,
    /// Upper bound for the webhook call
    pub webhook_timeout_secs: u64,
}

impl Default for ClaimServiceConfig {
    fn default() -> Self {
        Self {
            delivery_timeout_secs: DEFAULT_DELIVERY_TIMEOUT_SECS,
            webhook_timeout_secs: 10,
        }
    }
}
