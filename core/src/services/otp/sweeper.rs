//! Periodic removal of expired OTP records
//!
//! Readers already delete expired records lazily; the sweeper only bounds
//! memory for identities that never come back.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::clock::Clock;
use super::traits::OtpStore;

/// Sweeps expired records out of the store at a fixed interval
pub struct OtpSweeper<S: OtpStore + 'static> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    interval_secs: u64,
}

impl<S: OtpStore + 'static> OtpSweeper<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, interval_secs: u64) -> Self {
        Self {
            store,
            clock,
            interval_secs,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.interval_secs > 0
    }

    /// Run a single sweep; returns the number of records removed
    pub fn run_sweep(&self) -> usize {
        let now = self.clock.now();
        let removed = self.store.retain(|record| !record.is_expired_at(now));
        if removed > 0 {
            info!(removed = removed, remaining = self.store.len(), event = "otp_sweep", "Removed expired OTPs");
        } else {
            debug!(remaining = self.store.len(), "OTP sweep found nothing to remove");
        }
        removed
    }

    /// Spawn the sweep loop on the current tokio runtime
    ///
    /// Returns `None` when the interval is zero.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.is_enabled() {
            info!("OTP sweeper is disabled");
            return None;
        }

        let period = std::time::Duration::from_secs(self.interval_secs);

        Some(tokio::spawn(async move {
            info!(interval_secs = self.interval_secs, "OTP sweeper started");

            let mut interval_timer = tokio::time::interval(period);
            loop {
                interval_timer.tick().await;
                self.run_sweep();
            }
        }))
    }
}
