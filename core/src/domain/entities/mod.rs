//! Domain entities representing core business objects.

pub mod preauth_claim;
pub mod otp_record;


// Re-export commonly used types
pub use preauth_claim::PreAuthClaim;
pub use otp_record::{OtpRecord, CODE_LENGTH, CODE_MAX, CODE_MIN};
