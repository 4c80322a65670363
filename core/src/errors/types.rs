//! Error types for OTP handling, input validation and outbound delivery

use thiserror::Error;

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid format for field: {field}")]
    InvalidFormat { field: String },
}

/// Verification outcomes other than success
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpError {
    /// Never issued, already consumed, or swept
    #[error("OTP not found or expired. Please request a new one.")]
    NotFound,

    /// Found but past its deadline; the record has been removed
    #[error("OTP has expired. Please request a new one.")]
    Expired,

    /// Wrong code; the record is kept so the user can retry
    #[error("Invalid OTP. Please try again.")]
    Mismatch,

    /// Already verified and waiting to be consumed by a submission
    #[error("OTP already verified. Please submit the form or request a new one.")]
    AlreadyVerified,
}

/// Failures talking to the mail relay or the claim webhook
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Mail delivery failed: {message}")]
    Mail { message: String },

    #[error("Webhook delivery failed: {message}")]
    Webhook { message: String },

    #[error("Delivery timed out after {seconds}s")]
    Timeout { seconds: u64 },
}
