//! Handler for `/api/submit-preauth`

use actix_web::{web, HttpResponse};

use pa_core::domain::entities::PreAuthClaim;
use pa_core::domain::value_objects::GateDecision;
use pa_core::errors::{DomainError, ValidationError};
use pa_core::services::claim::ClaimForwarderTrait;
use pa_core::services::otp::{MailerTrait, OtpStore};

use crate::dto::SubmitPreAuthResponse;
use crate::handlers::error::handle_domain_error_with;
use crate::middleware::VerifiedEmail;

use super::AppState;

const SUBMIT_FAILURE_MESSAGE: &str = "Failed to submit form. Please try again.";

/// Handler for POST /api/submit-preauth
///
/// Normally mounted behind [`crate::middleware::OtpGate`], which supplies the
/// grant. Without the middleware the same gate check runs inline, so the
/// handler is never reachable by an unverified email.
pub async fn submit_preauth<S, M, F>(
    state: web::Data<AppState<S, M, F>>,
    verified: Option<VerifiedEmail>,
    claim: web::Json<PreAuthClaim>,
) -> HttpResponse
where
    S: OtpStore + 'static,
    M: MailerTrait + 'static,
    F: ClaimForwarderTrait + 'static,
{
    let claim = claim.into_inner();

    let grant = match verified {
        Some(verified) => verified.into_grant(),
        None => {
            if claim.identity().is_empty() {
                return handle_domain_error_with(
                    &DomainError::Validation(ValidationError::RequiredField {
                        field: "email".to_string(),
                    }),
                    SUBMIT_FAILURE_MESSAGE,
                );
            }
            match state.otp_service.require_verified(claim.identity()) {
                GateDecision::Allow(grant) => grant,
                GateDecision::Deny(reason) => {
                    return handle_domain_error_with(&DomainError::GateDenied(reason), SUBMIT_FAILURE_MESSAGE)
                }
            }
        }
    };

    match state.claim_service.submit(claim, grant).await {
        Ok(receipt) => HttpResponse::Ok().json(SubmitPreAuthResponse::from(receipt)),
        Err(e) => handle_domain_error_with(&e, SUBMIT_FAILURE_MESSAGE),
    }
}
