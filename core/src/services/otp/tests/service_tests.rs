//! Tests for the OTP lifecycle

use chrono::Duration;
use pa_shared::config::VerificationPolicy;
use std::time::Duration as StdDuration;

use super::{harness, harness_with_mailer};
use crate::domain::value_objects::{DenyReason, GateDecision, OtpStatus};
use crate::errors::{DeliveryError, DomainError, OtpError, ValidationError};
use crate::services::mock::MockMailer;
use crate::services::otp::{Clock, OtpStore, VerificationGate, DEFAULT_DISPLAY_NAME};

const EMAIL: &str = "patient@example.com";

#[tokio::test]
async fn test_issue_stores_and_mails_code() {
    let h = harness(VerificationPolicy::Defer);

    let issued = h.service.issue(EMAIL, Some("Asha Rao")).await.unwrap();

    assert_eq!(issued.identity, EMAIL);
    assert_eq!(issued.code.len(), 6);
    assert!(issued.message_id.starts_with("mock-mail-"));
    assert_eq!(issued.expires_at, h.clock.now() + Duration::minutes(10));

    let sent = h.mailer.sent_otps();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, EMAIL);
    assert_eq!(sent[0].display_name, "Asha Rao");
    assert_eq!(sent[0].code, issued.code);
    assert_eq!(sent[0].ttl_minutes, 10);

    let record = h.store.get(EMAIL).unwrap();
    assert_eq!(record.id, issued.record_id);
    assert!(!record.verified);
}

#[tokio::test]
async fn test_issue_defaults_display_name() {
    let h = harness(VerificationPolicy::Defer);
    h.service.issue(EMAIL, Some("   ")).await.unwrap();
    assert_eq!(h.mailer.sent_otps()[0].display_name, DEFAULT_DISPLAY_NAME);
}

#[tokio::test]
async fn test_issue_requires_identity() {
    let h = harness(VerificationPolicy::Defer);
    let err = h.service.issue("  ", None).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::RequiredField { ref field }) if field == "email"
    ));
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn test_mail_failure_keeps_record() {
    let h = harness_with_mailer(VerificationPolicy::Defer, MockMailer::failing());

    let err = h.service.issue(EMAIL, None).await.unwrap_err();
    assert!(matches!(err, DomainError::Delivery(DeliveryError::Mail { .. })));
    assert!(h.store.get(EMAIL).is_some());
}

#[tokio::test(start_paused = true)]
async fn test_mail_timeout_is_a_failure() {
    let h = harness_with_mailer(
        VerificationPolicy::Defer,
        MockMailer::with_delay(StdDuration::from_secs(30)),
    );

    let err = h.service.issue(EMAIL, None).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Delivery(DeliveryError::Timeout { seconds: 10 })
    ));
}

#[test]
fn test_verify_never_issued() {
    let h = harness(VerificationPolicy::Defer);
    assert_eq!(h.service.verify(EMAIL, "123456"), Err(OtpError::NotFound));
}

#[tokio::test]
async fn test_send_wrong_then_correct_then_again() {
    let h = harness(VerificationPolicy::Defer);
    let issued = h.service.issue(EMAIL, None).await.unwrap();
    let wrong = if issued.code == "111111" { "222222" } else { "111111" };

    assert_eq!(h.service.verify(EMAIL, wrong), Err(OtpError::Mismatch));
    assert!(h.store.get(EMAIL).is_some());

    let verified = h.service.verify(EMAIL, &issued.code).unwrap();
    assert_eq!(verified.record_id, issued.record_id);
    assert!(!verified.consumed);
    assert!(h.store.get(EMAIL).unwrap().verified);

    assert_eq!(h.service.verify(EMAIL, &issued.code), Err(OtpError::AlreadyVerified));
}

#[tokio::test]
async fn test_consume_policy_deletes_on_success() {
    let h = harness(VerificationPolicy::Consume);
    let issued = h.service.issue(EMAIL, None).await.unwrap();

    let verified = h.service.verify(EMAIL, &issued.code).unwrap();
    assert!(verified.consumed);
    assert!(h.store.get(EMAIL).is_none());

    assert_eq!(h.service.verify(EMAIL, &issued.code), Err(OtpError::NotFound));
    assert_eq!(
        h.service.require_verified(EMAIL),
        GateDecision::Deny(DenyReason::NoRecord)
    );
}

#[tokio::test]
async fn test_verify_accepts_surrounding_whitespace() {
    let h = harness(VerificationPolicy::Defer);
    let issued = h.service.issue(EMAIL, None).await.unwrap();
    let padded = format!(" {} ", issued.code);
    assert!(h.service.verify(" patient@example.com ", &padded).is_ok());
}

#[tokio::test]
async fn test_expired_code_is_deleted() {
    let h = harness(VerificationPolicy::Defer);
    let issued = h.service.issue(EMAIL, None).await.unwrap();

    h.clock.advance(Duration::minutes(11));

    assert_eq!(h.service.verify(EMAIL, &issued.code), Err(OtpError::Expired));
    assert!(h.store.get(EMAIL).is_none());
    assert_eq!(h.service.verify(EMAIL, &issued.code), Err(OtpError::NotFound));
}

#[tokio::test]
async fn test_code_valid_exactly_at_deadline() {
    let h = harness(VerificationPolicy::Defer);
    let issued = h.service.issue(EMAIL, None).await.unwrap();

    h.clock.advance(Duration::minutes(10));
    assert!(h.service.verify(EMAIL, &issued.code).is_ok());
}

#[tokio::test]
async fn test_expired_wins_over_mismatch() {
    let h = harness(VerificationPolicy::Defer);
    h.service.issue(EMAIL, None).await.unwrap();

    h.clock.advance(Duration::minutes(11));
    assert_eq!(h.service.verify(EMAIL, "000000"), Err(OtpError::Expired));
}

#[tokio::test]
async fn test_reissue_invalidates_previous_code() {
    let h = harness(VerificationPolicy::Defer);
    let first = h.service.issue(EMAIL, None).await.unwrap();
    let mut second = h.service.issue(EMAIL, None).await.unwrap();
    while second.code == first.code {
        second = h.service.issue(EMAIL, None).await.unwrap();
    }

    assert_eq!(h.store.len(), 1);
    assert_eq!(h.service.verify(EMAIL, &first.code), Err(OtpError::Mismatch));
    assert!(h.service.verify(EMAIL, &second.code).is_ok());
}

#[tokio::test]
async fn test_reissue_resets_verified_flag() {
    let h = harness(VerificationPolicy::Defer);
    let issued = h.service.issue(EMAIL, None).await.unwrap();
    h.service.verify(EMAIL, &issued.code).unwrap();

    h.service.issue(EMAIL, None).await.unwrap();
    assert_eq!(
        h.service.require_verified(EMAIL),
        GateDecision::Deny(DenyReason::NotVerified)
    );
}

#[tokio::test]
async fn test_gate_decisions() {
    let h = harness(VerificationPolicy::Defer);
    assert_eq!(h.service.require_verified(EMAIL), GateDecision::Deny(DenyReason::NoRecord));

    let issued = h.service.issue(EMAIL, None).await.unwrap();
    assert_eq!(
        h.service.require_verified(EMAIL),
        GateDecision::Deny(DenyReason::NotVerified)
    );

    h.service.verify(EMAIL, &issued.code).unwrap();
    let grant = h.service.require_verified(EMAIL).into_result().unwrap();
    assert_eq!(grant.identity, EMAIL);
    assert_eq!(grant.record_id, issued.record_id);

    // the gate itself does not consume
    assert!(h.service.require_verified(EMAIL).is_allowed());
}

#[tokio::test]
async fn test_gate_checks_expiry_before_verified_flag() {
    let h = harness(VerificationPolicy::Defer);
    let issued = h.service.issue(EMAIL, None).await.unwrap();
    h.service.verify(EMAIL, &issued.code).unwrap();

    h.clock.advance(Duration::minutes(11));

    assert_eq!(h.service.require_verified(EMAIL), GateDecision::Deny(DenyReason::Expired));
    assert!(h.store.get(EMAIL).is_none());
}

#[tokio::test]
async fn test_consume_then_gate_has_no_record() {
    let h = harness(VerificationPolicy::Defer);
    let issued = h.service.issue(EMAIL, None).await.unwrap();
    h.service.verify(EMAIL, &issued.code).unwrap();

    let grant = h.service.require_verified(EMAIL).into_result().unwrap();
    assert!(h.service.consume(&grant));
    assert!(!h.service.consume(&grant));

    assert_eq!(h.service.require_verified(EMAIL), GateDecision::Deny(DenyReason::NoRecord));
}

#[tokio::test]
async fn test_stale_grant_does_not_remove_newer_issuance() {
    let h = harness(VerificationPolicy::Defer);
    let issued = h.service.issue(EMAIL, None).await.unwrap();
    h.service.verify(EMAIL, &issued.code).unwrap();
    let grant = h.service.require_verified(EMAIL).into_result().unwrap();

    let resent = h.service.issue(EMAIL, None).await.unwrap();

    assert!(!h.service.consume(&grant));
    assert_eq!(h.store.get(EMAIL).unwrap().id, resent.record_id);
}

#[tokio::test]
async fn test_status_reports_lifecycle() {
    let h = harness(VerificationPolicy::Defer);
    assert_eq!(h.service.status(EMAIL), OtpStatus::absent());

    let issued = h.service.issue(EMAIL, None).await.unwrap();
    assert_eq!(h.service.status(EMAIL), OtpStatus::pending(false));

    h.service.verify(EMAIL, &issued.code).unwrap();
    assert_eq!(h.service.status(EMAIL), OtpStatus::pending(true));

    h.clock.advance(Duration::minutes(11));
    assert_eq!(h.service.status(EMAIL), OtpStatus::expired());
    assert!(h.store.get(EMAIL).is_none());
    assert_eq!(h.service.status(EMAIL), OtpStatus::absent());
}

#[tokio::test]
async fn test_identities_are_independent() {
    let h = harness(VerificationPolicy::Defer);
    let a = h.service.issue("a@example.com", None).await.unwrap();
    h.service.issue("b@example.com", None).await.unwrap();

    h.service.verify("a@example.com", &a.code).unwrap();
    assert!(h.service.status("a@example.com").verified);
    assert!(!h.service.status("b@example.com").verified);
}

#[tokio::test]
async fn test_verification_gate_trait_object() {
    let h = harness(VerificationPolicy::Defer);
    let issued = h.service.issue(EMAIL, None).await.unwrap();
    h.service.verify(EMAIL, &issued.code).unwrap();

    let gate: std::sync::Arc<dyn VerificationGate> = h.service.clone();
    assert!(gate.require_verified(EMAIL).is_allowed());
}

#[tokio::test]
async fn test_concurrent_verifies_succeed_once() {
    let h = harness(VerificationPolicy::Consume);
    let issued = h.service.issue(EMAIL, None).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = h.service.clone();
        let code = issued.code.clone();
        handles.push(std::thread::spawn(move || service.verify(EMAIL, &code).is_ok()));
    }

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();
    assert_eq!(successes, 1);
}

#[tokio::test]
async fn test_take_grant_hands_out_record_once() {
    let h = harness(VerificationPolicy::Defer);
    let issued = h.service.issue(EMAIL, None).await.unwrap();
    h.service.verify(EMAIL, &issued.code).unwrap();
    let grant = h.service.require_verified(EMAIL).into_result().unwrap();

    let record = h.service.take_grant(&grant).unwrap();
    assert_eq!(record.id, issued.record_id);
    assert!(h.store.is_empty());

    assert_eq!(h.service.take_grant(&grant).unwrap_err(), DenyReason::NoRecord);

    assert!(h.service.restore(record));
    assert!(h.service.require_verified(EMAIL).is_allowed());
}

#[tokio::test]
async fn test_take_grant_rechecks_expiry_and_issuance() {
    let h = harness(VerificationPolicy::Defer);
    let issued = h.service.issue(EMAIL, None).await.unwrap();
    h.service.verify(EMAIL, &issued.code).unwrap();
    let grant = h.service.require_verified(EMAIL).into_result().unwrap();

    // a resend replaces the verified record with an unverified one
    h.service.issue(EMAIL, None).await.unwrap();
    assert_eq!(h.service.take_grant(&grant).unwrap_err(), DenyReason::NotVerified);
    assert!(h.store.get(EMAIL).is_some());

    h.clock.advance(Duration::minutes(11));
    assert_eq!(h.service.take_grant(&grant).unwrap_err(), DenyReason::Expired);
    assert!(h.store.is_empty());
}
