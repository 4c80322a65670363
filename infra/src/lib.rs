//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the core services depend on:
//!
//! - **Cache**: process-local OTP store
//! - **Mail**: SMTP relay via lettre, plus a console fallback
//! - **Webhook**: reqwest client for the downstream claim workflow

/// Cache module - in-memory OTP store
pub mod cache;

/// Mail module - OTP and receipt delivery
pub mod mail;

/// Webhook module - claim forwarding
pub mod webhook;

pub use cache::InMemoryOtpStore;
pub use mail::{create_mailer, ConsoleMailer, SmtpMailer};
pub use webhook::WebhookForwarder;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// SMTP transport error
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Mail message could not be built
    #[error("Mail message error: {0}")]
    Message(#[from] lettre::error::Error),

    /// Malformed mail address
    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
