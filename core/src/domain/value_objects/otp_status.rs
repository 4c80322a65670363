//! Snapshot of an identity's OTP state.

use serde::{Deserialize, Serialize};

/// What the status query reports for one identity
///
/// An expired record is removed during the query and reported as
/// `exists: false, expired: true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OtpStatus {
    pub exists: bool,
    pub verified: bool,
    pub expired: bool,
}

impl OtpStatus {
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn expired() -> Self {
        Self {
            exists: false,
            verified: false,
            expired: true,
        }
    }

    pub fn pending(verified: bool) -> Self {
        Self {
            exists: true,
            verified,
            expired: false,
        }
    }
}
