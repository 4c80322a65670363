//! Email OTP service module
//!
//! This module provides the OTP lifecycle used to prove control of an email
//! address before a claim is accepted:
//! - Code generation, storage and mail delivery
//! - Verification with a configurable success policy
//! - The verification gate and status queries, with lazy expiry
//! - A background sweeper for expired records

pub mod clock;
mod config;
mod service;
mod sweeper;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::OtpServiceConfig;
pub use service::{OtpService, DEFAULT_DISPLAY_NAME};
pub use sweeper::OtpSweeper;
pub use traits::{MailerTrait, OtpStore, VerificationGate};
pub use types::{IssuedOtp, VerifiedOtp};
