//! Value objects representing immutable domain concepts.

pub mod gate;
pub mod otp_status;

// Re-export commonly used types
pub use gate::{DenyReason, GateDecision, VerifiedGrant};
pub use otp_status::OtpStatus;
