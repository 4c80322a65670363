//! Tests for domain error conversions and messages

use std::collections::BTreeMap;

use crate::domain::value_objects::DenyReason;
use crate::errors::{DeliveryError, DomainError, OtpError, ValidationError};

#[test]
fn test_otp_error_messages() {
    assert_eq!(
        OtpError::NotFound.to_string(),
        "OTP not found or expired. Please request a new one."
    );
    assert_eq!(OtpError::Expired.to_string(), "OTP has expired. Please request a new one.");
    assert_eq!(OtpError::Mismatch.to_string(), "Invalid OTP. Please try again.");
}

#[test]
fn test_bridges_are_transparent() {
    let err: DomainError = OtpError::Mismatch.into();
    assert!(matches!(err, DomainError::Otp(OtpError::Mismatch)));
    assert_eq!(err.to_string(), "Invalid OTP. Please try again.");

    let err: DomainError = ValidationError::RequiredField { field: "email".into() }.into();
    assert_eq!(err.to_string(), "Field required: email");

    let err: DomainError = DeliveryError::Timeout { seconds: 10 }.into();
    assert_eq!(err.to_string(), "Delivery timed out after 10s");
}

#[test]
fn test_gate_denied_uses_reason_message() {
    let err: DomainError = DenyReason::NotVerified.into();
    assert!(matches!(err, DomainError::GateDenied(DenyReason::NotVerified)));
    assert_eq!(err.to_string(), DenyReason::NotVerified.message());
}

#[test]
fn test_invalid_claim_counts_fields() {
    let mut fields = BTreeMap::new();
    fields.insert("email".to_string(), vec!["Email is required".to_string()]);
    fields.insert("phoneNumber".to_string(), vec!["Phone number must be 10 digits".to_string()]);

    let err = DomainError::InvalidClaim { fields };
    assert_eq!(err.to_string(), "Claim validation failed for 2 field(s)");
}
