//! Call records consumed by contracts.

use serde::{Deserialize, Serialize};

use crate::BillingPeriod;

/// A completed voice call.
///
/// Calls are produced by the call-log loader and only read by contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    /// Length of the call in seconds.
    pub duration_seconds: u64,

    /// Month the call was made in.
    pub period: BillingPeriod,
}

impl Call {
    /// Create a call of `duration_seconds` made during `period`.
    #[must_use]
    pub const fn new(duration_seconds: u64, period: BillingPeriod) -> Self {
        Self {
            duration_seconds,
            period,
        }
    }

    /// Whole minutes charged for this call, rounding any partial minute up.
    #[must_use]
    pub const fn billable_minutes(&self) -> u64 {
        self.duration_seconds.div_ceil(60)
    }
}
