//! Webhook client for the downstream claim workflow

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use pa_core::domain::entities::PreAuthClaim;
use pa_core::services::claim::{ClaimForwarderTrait, ForwardOutcome};
use pa_shared::config::WebhookConfig;

use crate::InfrastructureError;


/// JSON body posted to the webhook
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimWebhookPayload<'a> {
    pub reference: Uuid,
    pub submitted_at: chrono::DateTime<Utc>,
    #[serde(flatten)]
    pub claim: &'a PreAuthClaim,
}

/// Posts accepted claims to the configured URL
///
/// With no URL configured every call reports [`ForwardOutcome::Disabled`]
/// without a request.
pub struct WebhookForwarder {
    client: Client,
    url: Option<String>,
}

impl WebhookForwarder {
    pub fn new(config: &WebhookConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let url = config
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string);

        Ok(Self { client, url })
    }

    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    async fn post(&self, url: &str, payload: &ClaimWebhookPayload<'_>) -> Result<(), InfrastructureError> {
        self.client
            .post(url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl ClaimForwarderTrait for WebhookForwarder {
    async fn forward(&self, claim: &PreAuthClaim, reference: Uuid) -> Result<ForwardOutcome, String> {
        let Some(url) = self.url.as_deref() else {
            debug!(reference = %reference, "No webhook configured; skipping forward");
            return Ok(ForwardOutcome::Disabled);
        };

        let payload = ClaimWebhookPayload {
            reference,
            submitted_at: Utc::now(),
            claim,
        };

        self.post(url, &payload).await.map_err(|e| e.to_string())?;
        info!(reference = %reference, "Claim forwarded to webhook");
        Ok(ForwardOutcome::Delivered)
    }
}
