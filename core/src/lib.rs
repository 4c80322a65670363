//! # Pre-Authorization Core
//!
//! Core business logic and domain layer for the pre-authorization backend.
//! This crate contains the OTP and claim entities, the OTP lifecycle and claim
//! submission services, the collaborator traits they depend on, and the
//! domain error types.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
