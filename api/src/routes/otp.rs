//! Handlers for `/api/send-otp`, `/api/verify-otp` and `/api/check-otp-status`

use actix_web::{http::StatusCode, web, HttpResponse};
use validator::Validate;

use pa_core::errors::{DomainError, ValidationError};
use pa_core::services::claim::ClaimForwarderTrait;
use pa_core::services::otp::{MailerTrait, OtpStore};
use pa_shared::errors::{error_codes, ErrorResponse};
use pa_shared::utils::mask_email;

use crate::dto::{
    CheckOtpStatusRequest, ErrorResponseExt, OtpStatusResponse, SendOtpRequest, SendOtpResponse,
    VerifyOtpRequest, VerifyOtpResponse,
};
use crate::handlers::error::{field_errors_response, handle_domain_error, handle_domain_error_with, validator_field_errors};

use super::AppState;

const SEND_FAILURE_MESSAGE: &str = "Failed to send OTP. Please try again.";

/// Handler for POST /api/send-otp
///
/// ```json
/// { "email": "patient@example.com", "patientName": "Asha Rao" }
/// ```
///
/// Replies `{ "success": true, "message": "OTP sent successfully" }`, plus
/// `devOTP` when development echo is enabled. 400 for a missing or malformed
/// email, 500 when the mail could not be delivered.
pub async fn send_otp<S, M, F>(
    state: web::Data<AppState<S, M, F>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    S: OtpStore + 'static,
    M: MailerTrait + 'static,
    F: ClaimForwarderTrait + 'static,
{
    let request = request.into_inner();
    let email = request.email.trim().to_string();

    if email.is_empty() {
        return email_required();
    }

    let normalized = SendOtpRequest { email, ..request };
    if let Err(errors) = normalized.validate() {
        tracing::warn!(
            identity = %mask_email(&normalized.email),
            "Validation failed for send-otp request"
        );
        return field_errors_response("Please enter a valid email address", &validator_field_errors(&errors));
    }

    match state
        .otp_service
        .issue(&normalized.email, normalized.patient_name.as_deref())
        .await
    {
        Ok(issued) => {
            let dev_otp = state.otp_service.config().dev_echo.then_some(issued.code);
            HttpResponse::Ok().json(SendOtpResponse {
                success: true,
                message: "OTP sent successfully".to_string(),
                dev_otp,
            })
        }
        Err(e) => handle_domain_error_with(&e, SEND_FAILURE_MESSAGE),
    }
}

/// Handler for POST /api/verify-otp
///
/// Every rejection (unknown, expired, wrong or already verified code) is a
/// 400 with `success: false` and a message the form shows as-is.
pub async fn verify_otp<S, M, F>(
    state: web::Data<AppState<S, M, F>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    S: OtpStore + 'static,
    M: MailerTrait + 'static,
    F: ClaimForwarderTrait + 'static,
{
    let email = request.email.trim();
    let otp = request.otp.trim();

    if email.is_empty() || otp.is_empty() {
        return ErrorResponse::new(error_codes::VALIDATION_ERROR, "Email and OTP are required")
            .to_response(StatusCode::BAD_REQUEST);
    }

    if let Err(errors) = request.validate() {
        return field_errors_response("Invalid OTP format", &validator_field_errors(&errors));
    }

    match state.otp_service.verify(email, otp) {
        Ok(_) => HttpResponse::Ok().json(VerifyOtpResponse {
            success: true,
            otp_verified: true,
            message: "Email verified successfully".to_string(),
        }),
        Err(e) => handle_domain_error(&DomainError::Otp(e)),
    }
}

/// Handler for POST /api/check-otp-status
pub async fn check_otp_status<S, M, F>(
    state: web::Data<AppState<S, M, F>>,
    request: web::Json<CheckOtpStatusRequest>,
) -> HttpResponse
where
    S: OtpStore + 'static,
    M: MailerTrait + 'static,
    F: ClaimForwarderTrait + 'static,
{
    let email = request.email.trim();
    if email.is_empty() {
        return email_required();
    }

    let status = state.otp_service.status(email);
    HttpResponse::Ok().json(OtpStatusResponse::from(status))
}

fn email_required() -> HttpResponse {
    handle_domain_error(&DomainError::Validation(ValidationError::RequiredField {
        field: "email".to_string(),
    }))
}
