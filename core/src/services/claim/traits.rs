//! Trait for the downstream claim workflow

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::PreAuthClaim;

use super::types::ForwardOutcome;

/// Hands an accepted claim to the downstream workflow
#[async_trait]
pub trait ClaimForwarderTrait: Send + Sync {
    /// Forward `claim`; an `Err` carries the reason delivery failed
    async fn forward(&self, claim: &PreAuthClaim, reference: Uuid) -> Result<ForwardOutcome, String>;
}
