//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{DeliveryError, OtpError, ValidationError};

use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::value_objects::DenyReason;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Otp(#[from] OtpError),

    /// The gate refused the identity
    #[error("{0}")]
    GateDenied(DenyReason),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// Claim fields failed validation; messages grouped by camelCase field name
    #[error("Claim validation failed for {} field(s)", fields.len())]
    InvalidClaim { fields: BTreeMap<String, Vec<String>> },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<DenyReason> for DomainError {
    fn from(reason: DenyReason) -> Self {
        DomainError::GateDenied(reason)
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
