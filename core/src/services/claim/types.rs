//! Types for claim submission results

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Acknowledgement of an accepted claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub reference: Uuid,
    pub submitted_at: DateTime<Utc>,
    /// Whether the downstream webhook accepted the claim
    pub forwarded: bool,
}

/// What the forwarder did with an accepted claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForwardOutcome {
    /// The downstream workflow accepted the claim
    Delivered,
    /// Forwarding is switched off; nothing was sent
    Disabled,
}
