use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pa_core::services::claim::SubmissionReceipt;

/// Body returned for an accepted claim
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPreAuthResponse {
    pub success: bool,
    pub message: String,
    pub reference: Uuid,
    pub submitted_at: DateTime<Utc>,
}

impl From<SubmissionReceipt> for SubmitPreAuthResponse {
    fn from(receipt: SubmissionReceipt) -> Self {
        Self {
            success: true,
            message: "Pre-authorization submitted successfully".to_string(),
            reference: receipt.reference,
            submitted_at: receipt.submitted_at,
        }
    }
}
