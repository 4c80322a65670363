//! Mapping from domain errors to HTTP responses

use actix_web::{error::InternalError, error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use std::collections::BTreeMap;

use pa_core::errors::{DeliveryError, DomainError, OtpError, ValidationError};
use pa_shared::errors::{error_codes, ErrorResponse};

use crate::dto::ErrorResponseExt;

/// Message used for server-side failures when the route gives none
pub const DEFAULT_FAILURE_MESSAGE: &str = "An internal error occurred";

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    handle_domain_error_with(error, DEFAULT_FAILURE_MESSAGE)
}

/// Handle domain errors, using `failure_message` for 500 responses
///
/// Server-side failures never leak transport details to the form; those
/// stay in the log.
pub fn handle_domain_error_with(error: &DomainError, failure_message: &str) -> HttpResponse {
    match error {
        DomainError::Validation(validation_error) => {
            tracing::warn!(error = %validation_error, "Request validation failed");
            let field = match validation_error {
                ValidationError::RequiredField { field } | ValidationError::InvalidFormat { field } => field,
            };
            ErrorResponse::new(error_codes::VALIDATION_ERROR, validation_message(validation_error))
                .add_detail("field", field)
                .to_response(StatusCode::BAD_REQUEST)
        }
        DomainError::Otp(otp_error) => {
            tracing::warn!(reason = ?otp_error, "OTP verification rejected");
            ErrorResponse::new(otp_error_code(otp_error), otp_error.to_string())
                .to_response(StatusCode::BAD_REQUEST)
        }
        DomainError::GateDenied(reason) => {
            tracing::warn!(reason = ?reason, "Submission blocked by OTP gate");
            ErrorResponse::new(error_codes::OTP_NOT_VERIFIED, reason.message())
                .add_detail("reason", reason)
                .to_response(StatusCode::FORBIDDEN)
        }
        DomainError::InvalidClaim { fields } => {
            tracing::warn!(fields = ?fields.keys().collect::<Vec<_>>(), "Claim rejected");
            field_errors_response("Please correct the highlighted fields.", fields)
        }
        DomainError::Delivery(delivery_error) => {
            tracing::error!(error = %delivery_error, "Outbound delivery failed");
            let code = match delivery_error {
                DeliveryError::Mail { .. } | DeliveryError::Timeout { .. } => error_codes::MAIL_DELIVERY_FAILED,
                DeliveryError::Webhook { .. } => error_codes::INTERNAL_ERROR,
            };
            ErrorResponse::new(code, failure_message).to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
        DomainError::Internal { message } => {
            tracing::error!(error = %message, "Internal error");
            ErrorResponse::new(error_codes::INTERNAL_ERROR, failure_message)
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// 400 response carrying per-field messages under `details.fields`
pub fn field_errors_response(message: &str, fields: &BTreeMap<String, Vec<String>>) -> HttpResponse {
    ErrorResponse::new(error_codes::VALIDATION_ERROR, message)
        .add_detail("fields", fields)
        .to_response(StatusCode::BAD_REQUEST)
}

/// Convert `validator` failures into the field map used by every 400 response
pub fn validator_field_errors(errors: &validator::ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Error handler for malformed JSON bodies
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(path = %req.path(), error = %err, "Rejected malformed JSON body");

    let status = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        _ => StatusCode::BAD_REQUEST,
    };
    let response = ErrorResponse::new(error_codes::BAD_REQUEST, "Invalid request body").to_response(status);
    InternalError::from_response(err, response).into()
}

fn validation_message(error: &ValidationError) -> String {
    match error {
        ValidationError::RequiredField { field } if field == "email" => "Email is required".to_string(),
        ValidationError::RequiredField { field } => format!("{} is required", field),
        ValidationError::InvalidFormat { field } => format!("Invalid {}", field),
    }
}

fn otp_error_code(error: &OtpError) -> &'static str {
    match error {
        OtpError::NotFound => error_codes::OTP_NOT_FOUND,
        OtpError::Expired => error_codes::OTP_EXPIRED,
        OtpError::Mismatch => error_codes::OTP_INVALID,
        OtpError::AlreadyVerified => error_codes::OTP_ALREADY_VERIFIED,
    }
}
