//! OTP verification gate for claim submission.
//!
//! The middleware buffers the JSON body, reads its `email` field and asks the
//! [`VerificationGate`] whether that address holds a verified, unexpired OTP.
//! Denied requests never reach the handler. Allowed requests carry a
//! [`VerifiedEmail`] extension and get their body back untouched.

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorForbidden,
    http::StatusCode,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use pa_core::domain::value_objects::{GateDecision, VerifiedGrant};
use pa_core::services::otp::VerificationGate;
use pa_shared::errors::{error_codes, ErrorResponse};
use pa_shared::utils::mask_email;

use crate::dto::ErrorResponseExt;

/// Grant injected into requests that passed the gate
#[derive(Debug, Clone)]
pub struct VerifiedEmail(pub VerifiedGrant);

impl VerifiedEmail {
    pub fn identity(&self) -> &str {
        &self.0.identity
    }

    pub fn into_grant(self) -> VerifiedGrant {
        self.0
    }
}

/// Extractor for handlers mounted behind [`OtpGate`]
impl FromRequest for VerifiedEmail {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<VerifiedEmail>()
            .cloned()
            .ok_or_else(|| ErrorForbidden("Email verification required"));

        ready(result)
    }
}

/// OTP gate middleware factory
#[derive(Clone)]
pub struct OtpGate {
    gate: Arc<dyn VerificationGate>,
}

impl OtpGate {
    pub fn new(gate: Arc<dyn VerificationGate>) -> Self {
        Self { gate }
    }
}

impl<S, B> Transform<S, ServiceRequest> for OtpGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = OtpGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OtpGateMiddleware {
            service: Rc::new(service),
            gate: Arc::clone(&self.gate),
        }))
    }
}

/// OTP gate middleware service
pub struct OtpGateMiddleware<S> {
    service: Rc<S>,
    gate: Arc<dyn VerificationGate>,
}

impl<S, B> Service<ServiceRequest> for OtpGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let gate = Arc::clone(&self.gate);

        Box::pin(async move {
            let body = match req.extract::<web::Bytes>().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(error = %e, "Could not read submission body");
                    let response = ErrorResponse::new(error_codes::BAD_REQUEST, "Invalid request body")
                        .to_response(StatusCode::BAD_REQUEST);
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            let email = extract_email(&body);
            req.set_payload(Payload::from(body));

            let email = match email {
                Some(email) => email,
                None => {
                    let response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Email is required")
                        .add_detail("field", "email")
                        .to_response(StatusCode::BAD_REQUEST);
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            match gate.require_verified(&email) {
                GateDecision::Allow(grant) => {
                    req.extensions_mut().insert(VerifiedEmail(grant));
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                GateDecision::Deny(reason) => {
                    tracing::warn!(
                        identity = %mask_email(&email),
                        reason = ?reason,
                        event = "submission_blocked",
                        "Submission blocked by OTP gate"
                    );
                    let response = ErrorResponse::new(error_codes::OTP_NOT_VERIFIED, reason.message())
                        .add_detail("reason", reason)
                        .to_response(StatusCode::FORBIDDEN);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Trimmed, non-empty `email` field of a JSON object body
fn extract_email(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let email = value.get("email")?.as_str()?.trim();
    if email.is_empty() {
        None
    } else {
        Some(email.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_email() {
        assert_eq!(
            extract_email(br#"{"email":"  a@x.com ","patientName":"Asha"}"#),
            Some("a@x.com".to_string())
        );
        assert_eq!(extract_email(br#"{"email":""}"#), None);
        assert_eq!(extract_email(br#"{"email":42}"#), None);
        assert_eq!(extract_email(br#"{"patientName":"Asha"}"#), None);
        assert_eq!(extract_email(b"not json"), None);
    }
}
