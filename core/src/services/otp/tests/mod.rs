mod service_tests;

use chrono::{TimeZone, Utc};
use pa_shared::config::VerificationPolicy;
use std::sync::Arc;

use crate::services::mock::{MockMailer, MockOtpStore};
use crate::services::otp::{ManualClock, OtpService, OtpServiceConfig};

pub(crate) type TestService = OtpService<MockOtpStore, MockMailer>;

pub(crate) struct Harness {
    pub service: Arc<TestService>,
    pub mailer: Arc<MockMailer>,
    pub store: Arc<MockOtpStore>,
    pub clock: Arc<ManualClock>,
}

pub(crate) fn harness(policy: VerificationPolicy) -> Harness {
    harness_with_mailer(policy, MockMailer::new())
}

pub(crate) fn harness_with_mailer(policy: VerificationPolicy, mailer: MockMailer) -> Harness {
    let store = Arc::new(MockOtpStore::new());
    let mailer = Arc::new(mailer);
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()));
    let config = OtpServiceConfig {
        policy,
        ..OtpServiceConfig::default()
    };

    let service = OtpService::new(store.clone(), mailer.clone(), config).with_clock(clock.clone());

    Harness {
        service: Arc::new(service),
        mailer,
        store,
        clock,
    }
}
