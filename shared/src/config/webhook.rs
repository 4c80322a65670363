//! Claim webhook configuration

use serde::{Deserialize, Serialize};

/// Downstream workflow endpoint that receives submitted claims
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Target URL; forwarding is skipped when unset
    pub url: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: 10,
        }
    }
}

impl WebhookConfig {
    /// Whether a target URL is configured
    pub fn is_enabled(&self) -> bool {
        self.url.as_deref().map_or(false, |u| !u.trim().is_empty())
    }
}
