//! End-to-end flow over the real in-memory store, console mailer and a
//! disabled webhook

use std::sync::Arc;

use pa_core::domain::entities::PreAuthClaim;
use pa_core::domain::value_objects::{DenyReason, GateDecision};
use pa_core::errors::OtpError;
use pa_core::services::claim::{ClaimServiceConfig, ClaimSubmissionService};
use pa_core::services::otp::{OtpService, OtpServiceConfig, OtpStore};
use pa_infra::{ConsoleMailer, InMemoryOtpStore, WebhookForwarder};
use pa_shared::config::{VerificationPolicy, WebhookConfig};

const EMAIL: &str = "asha@example.com";

fn claim() -> PreAuthClaim {
    PreAuthClaim {
        patient_name: "Asha Rao".to_string(),
        email: EMAIL.to_string(),
        phone_number: "9876543210".to_string(),
        hospital_name: "City Care Hospital".to_string(),
        policy_prefix: "HLT".to_string(),
        policy_number: "00123".to_string(),
        treatment_type: "Surgery".to_string(),
        estimated_amount: "150000".to_string(),
        doctor_notes: None,
    }
}

#[tokio::test]
async fn test_issue_verify_submit_over_in_memory_store() {
    let store = Arc::new(InMemoryOtpStore::new());
    let otp = Arc::new(OtpService::new(
        store.clone(),
        Arc::new(ConsoleMailer::new(false)),
        OtpServiceConfig {
            policy: VerificationPolicy::Defer,
            ..OtpServiceConfig::default()
        },
    ));
    let forwarder = Arc::new(WebhookForwarder::new(&WebhookConfig::default()).unwrap());
    let claims = ClaimSubmissionService::new(otp.clone(), forwarder, ClaimServiceConfig::default());

    let issued = otp.issue(EMAIL, Some("Asha Rao")).await.unwrap();
    assert_eq!(otp.require_verified(EMAIL), GateDecision::Deny(DenyReason::NotVerified));

    otp.verify(EMAIL, &issued.code).unwrap();
    let grant = otp.require_verified(EMAIL).into_result().unwrap();

    let receipt = claims.submit(claim(), grant).await.unwrap();
    // no webhook URL, so nothing was forwarded
    assert!(!receipt.forwarded);
    assert!(store.is_empty());

    assert_eq!(otp.verify(EMAIL, &issued.code), Err(OtpError::NotFound));
}
