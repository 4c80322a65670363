//! Claim submission behind the OTP gate

mod config;
mod service;
mod traits;
mod types;


pub use config::ClaimServiceConfig;
pub use service::ClaimSubmissionService;
pub use traits::ClaimForwarderTrait;
pub use types::{ForwardOutcome, SubmissionReceipt};
