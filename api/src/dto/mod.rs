pub mod error;
pub mod otp;
pub mod preauth;

pub use error::{ErrorResponse, ErrorResponseExt};
pub use otp::{
    CheckOtpStatusRequest, OtpStatusResponse, SendOtpRequest, SendOtpResponse, VerifyOtpRequest,
    VerifyOtpResponse,
};
pub use preauth::SubmitPreAuthResponse;
