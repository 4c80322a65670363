//! Shared setup for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{test, web};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use pa_api::AppState;
use pa_core::services::claim::{ClaimServiceConfig, ClaimSubmissionService};
use pa_core::services::mock::{MockForwarder, MockMailer};
use pa_core::services::otp::{ManualClock, OtpService, OtpServiceConfig};
use pa_infra::InMemoryOtpStore;
use pa_shared::config::{AppConfig, VerificationPolicy};

pub type TestState = AppState<InMemoryOtpStore, MockMailer, MockForwarder>;

pub const EMAIL: &str = "asha.rao@example.com";

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub config: AppConfig,
    pub mailer: MockMailer,
    pub forwarder: MockForwarder,
    pub clock: Arc<ManualClock>,
}

pub struct ContextBuilder {
    config: AppConfig,
    mailer: MockMailer,
    forwarder: MockForwarder,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            mailer: MockMailer::new(),
            forwarder: MockForwarder::new(),
        }
    }

    pub fn policy(mut self, policy: VerificationPolicy) -> Self {
        self.config.otp.policy = policy;
        self
    }

    pub fn dev_echo(mut self, enabled: bool) -> Self {
        self.config.otp.dev_echo = enabled;
        self
    }

    pub fn mailer(mut self, mailer: MockMailer) -> Self {
        self.mailer = mailer;
        self
    }

    pub fn forwarder(mut self, forwarder: MockForwarder) -> Self {
        self.forwarder = forwarder;
        self
    }

    pub fn build(self) -> TestContext {
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()));
        let store = Arc::new(InMemoryOtpStore::new());

        let otp_service = Arc::new(
            OtpService::new(
                store,
                Arc::new(self.mailer.clone()),
                OtpServiceConfig::from(&self.config.otp),
            )
            .with_clock(clock.clone()),
        );
        let claim_service = Arc::new(ClaimSubmissionService::new(
            Arc::clone(&otp_service),
            Arc::new(self.forwarder.clone()),
            ClaimServiceConfig::default(),
        ));

        TestContext {
            state: web::Data::new(AppState::new(otp_service, claim_service)),
            config: self.config,
            mailer: self.mailer,
            forwarder: self.forwarder,
            clock,
        }
    }
}

pub fn context() -> TestContext {
    ContextBuilder::new().build()
}

pub fn post_json(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_json(body)
}

/// A claim form that passes every field check
pub fn valid_claim(email: &str) -> Value {
    json!({
        "patientName": "Asha Rao",
        "email": email,
        "phoneNumber": "98765 43210",
        "hospitalName": "City Care Hospital",
        "policyPrefix": "HLT",
        "policyNumber": "00451234",
        "treatmentType": "Cardiology",
        "estimatedAmount": "250000",
        "doctorNotes": "Angioplasty advised"
    })
}
