//! Middleware modules for the pre-authorization API.

pub mod cors;
pub mod otp_gate;

pub use cors::create_cors;
pub use otp_gate::{OtpGate, OtpGateMiddleware, VerifiedEmail};
