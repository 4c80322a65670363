//! In-memory collaborators for tests
//!
//! Public so the api crate's integration tests can build a full service
//! stack without a mail relay or webhook endpoint.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use uuid::Uuid;

use crate::domain::entities::{OtpRecord, PreAuthClaim};
use crate::services::claim::{ClaimForwarderTrait, ForwardOutcome};
use crate::services::otp::{MailerTrait, OtpStore};

/// An OTP mail captured by [`MockMailer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentOtp {
    pub to: String,
    pub display_name: String,
    pub code: String,
    pub ttl_minutes: i64,
}

/// Mailer that records what it would have sent
#[derive(Clone, Default)]
pub struct MockMailer {
    sent_otps: Arc<Mutex<Vec<SentOtp>>>,
    receipts: Arc<Mutex<Vec<(String, Uuid)>>>,
    should_fail: bool,
    delay: Option<Duration>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send fails with a relay error
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Every send waits `delay` before answering
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn sent_otps(&self) -> Vec<SentOtp> {
        lock(&self.sent_otps).clone()
    }

    /// Most recent code mailed to `to`
    pub fn last_code_for(&self, to: &str) -> Option<String> {
        lock(&self.sent_otps)
            .iter()
            .rev()
            .find(|m| m.to == to)
            .map(|m| m.code.clone())
    }

    /// Recipients and references of receipt mails
    pub fn receipts(&self) -> Vec<(String, Uuid)> {
        lock(&self.receipts).clone()
    }

    async fn wait(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl MailerTrait for MockMailer {
    async fn send_otp(
        &self,
        to: &str,
        display_name: &str,
        code: &str,
        ttl_minutes: i64,
    ) -> Result<String, String> {
        self.wait().await;
        if self.should_fail {
            return Err("SMTP relay unavailable".to_string());
        }
        lock(&self.sent_otps).push(SentOtp {
            to: to.to_string(),
            display_name: display_name.to_string(),
            code: code.to_string(),
            ttl_minutes,
        });
        Ok(format!("mock-mail-{}", Uuid::new_v4()))
    }

    async fn send_claim_receipt(&self, claim: &PreAuthClaim, reference: Uuid) -> Result<String, String> {
        self.wait().await;
        if self.should_fail {
            return Err("SMTP relay unavailable".to_string());
        }
        lock(&self.receipts).push((claim.email.clone(), reference));
        Ok(format!("mock-mail-{}", Uuid::new_v4()))
    }
}

/// Webhook stand-in that records forwarded claims
#[derive(Clone, Default)]
pub struct MockForwarder {
    forwarded: Arc<Mutex<Vec<(PreAuthClaim, Uuid)>>>,
    should_fail: bool,
    disabled: bool,
}

impl MockForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Behaves like a forwarder with no destination configured
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    pub fn forwarded(&self) -> Vec<(PreAuthClaim, Uuid)> {
        lock(&self.forwarded).clone()
    }
}

#[async_trait]
impl ClaimForwarderTrait for MockForwarder {
    async fn forward(&self, claim: &PreAuthClaim, reference: Uuid) -> Result<ForwardOutcome, String> {
        if self.should_fail {
            return Err("webhook returned 502 Bad Gateway".to_string());
        }
        if self.disabled {
            return Ok(ForwardOutcome::Disabled);
        }
        lock(&self.forwarded).push((claim.clone(), reference));
        Ok(ForwardOutcome::Delivered)
    }
}

/// Plain map store
#[derive(Default)]
pub struct MockOtpStore {
    records: Mutex<HashMap<String, OtpRecord>>,
}

impl MockOtpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OtpStore for MockOtpStore {
    fn upsert(&self, record: OtpRecord) -> Option<OtpRecord> {
        lock(&self.records).insert(record.identity.clone(), record)
    }

    fn update<R, F>(&self, identity: &str, f: F) -> R
    where
        F: FnOnce(&mut Option<OtpRecord>) -> R,
    {
        let mut records = lock(&self.records);
        let mut slot = records.remove(identity);
        let result = f(&mut slot);
        if let Some(record) = slot {
            records.insert(identity.to_string(), record);
        }
        result
    }

    fn retain<F>(&self, mut keep: F) -> usize
    where
        F: FnMut(&OtpRecord) -> bool,
    {
        let mut records = lock(&self.records);
        let before = records.len();
        records.retain(|_, record| keep(record));
        before - records.len()
    }

    fn len(&self) -> usize {
        lock(&self.records).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
