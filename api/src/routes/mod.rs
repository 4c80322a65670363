//! Route handlers

pub mod health;
pub mod otp;
pub mod preauth;

use std::sync::Arc;

use pa_core::services::claim::{ClaimForwarderTrait, ClaimSubmissionService};
use pa_core::services::otp::{MailerTrait, OtpService, OtpStore};

/// Application state that holds shared services
pub struct AppState<S, M, F>
where
    S: OtpStore,
    M: MailerTrait,
    F: ClaimForwarderTrait,
{
    pub otp_service: Arc<OtpService<S, M>>,
    pub claim_service: Arc<ClaimSubmissionService<S, M, F>>,
}

impl<S, M, F> AppState<S, M, F>
where
    S: OtpStore,
    M: MailerTrait,
    F: ClaimForwarderTrait,
{
    pub fn new(otp_service: Arc<OtpService<S, M>>, claim_service: Arc<ClaimSubmissionService<S, M, F>>) -> Self {
        Self {
            otp_service,
            claim_service,
        }
    }
}
