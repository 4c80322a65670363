//! Shared utilities and common types for the pre-authorization server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures and codes
//! - Utility functions (claim field validation, log masking)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CorsConfig, Environment, LoggingConfig, MailConfig, OtpConfig, ServerConfig,
    VerificationPolicy, WebhookConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::{mask_email, validation};
