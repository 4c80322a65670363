//! Business services containing domain logic and use cases.

pub mod claim;
pub mod mock;
pub mod otp;

// Re-export commonly used types
pub use claim::{ClaimForwarderTrait, ClaimServiceConfig, ClaimSubmissionService, SubmissionReceipt};
pub use otp::{
    Clock, IssuedOtp, MailerTrait, OtpService, OtpServiceConfig, OtpStore, OtpSweeper,
    SystemClock, VerificationGate, VerifiedOtp,
};
