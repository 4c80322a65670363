//! Error body shared by every endpoint and the OTP gate

use actix_web::{http::StatusCode, HttpResponse};
pub use pa_shared::errors::{error_codes, ErrorResponse};

/// Render the shared error body as an actix response
pub trait ErrorResponseExt {
    fn to_response(&self, status: StatusCode) -> HttpResponse;
}

impl ErrorResponseExt for ErrorResponse {
    fn to_response(&self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}
