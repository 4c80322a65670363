//! Process-local OTP store
//!
//! One mutex guards the whole map. Every operation takes it once, runs to
//! completion and releases it; nothing awaits while it is held. Records are
//! plain data, so a poisoned lock is recovered rather than propagated.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::warn;

use pa_core::domain::entities::OtpRecord;
use pa_core::services::otp::OtpStore;

/// In-memory [`OtpStore`] keyed by email identity
#[derive(Debug, Default)]
pub struct InMemoryOtpStore {
    records: Mutex<HashMap<String, OtpRecord>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, OtpRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| {
            warn!("OTP store lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

impl OtpStore for InMemoryOtpStore {
    fn upsert(&self, record: OtpRecord) -> Option<OtpRecord> {
        self.lock().insert(record.identity.clone(), record)
    }

    fn update<R, F>(&self, identity: &str, f: F) -> R
    where
        F: FnOnce(&mut Option<OtpRecord>) -> R,
    {
        let mut records = self.lock();
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
        let mut records = self.lock();
        let before = records.len();
        records.retain(|_, record| keep(record));
        before - records.len()
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}
