//! Monthly bills.
//!
//! A [`Bill`] accumulates one line's charges for one month. The driver builds a
//! fresh bill for every month and hands it to the line's contract, which sets
//! the rates and fees and then adds call minutes as calls arrive.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::BillingPeriod;

/// Pricing plan a bill was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanLabel {
    /// Month-to-month, pay for what you use.
    Payg,

    /// Term commitment with included minutes.
    Term,

    /// Prepaid credit.
    Prepaid,
}

impl PlanLabel {
    /// Get the plan label as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Payg => "PAYG",
            Self::Term => "TERM",
            Self::Prepaid => "PREPAID",
        }
    }
}

/// Charges accumulated for one line in one month.
///
/// The mutators do plain arithmetic and never validate; keeping the values
/// sensible is up to the contract driving the bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bill {
    period: BillingPeriod,
    plan: Option<PlanLabel>,
    rate: Decimal,
    fixed_cost: Decimal,
    free_minutes: i64,
    billed_minutes: u64,
}

impl Bill {
    /// Create an empty bill for `period`.
    #[must_use]
    pub const fn new(period: BillingPeriod) -> Self {
        Self {
            period,
            plan: None,
            rate: Decimal::ZERO,
            fixed_cost: Decimal::ZERO,
            free_minutes: 0,
            billed_minutes: 0,
        }
    }

    /// Add a flat charge. Negative amounts record credit.
    pub fn add_fixed_cost(&mut self, amount: Decimal) {
        self.fixed_cost += amount;
    }

    /// Add minutes charged at the per-minute rate.
    pub fn add_billed_minutes(&mut self, minutes: u64) {
        self.billed_minutes += minutes;
    }

    /// Adjust the included-minute balance; positive replenishes, negative consumes.
    pub fn add_free_minutes(&mut self, delta: i64) {
        self.free_minutes += delta;
    }

    /// Set the plan and its per-minute rate.
    pub fn set_rates(&mut self, plan: PlanLabel, rate_per_minute: Decimal) {
        self.plan = Some(plan);
        self.rate = rate_per_minute;
    }

    /// Total owed for the month: fixed charges plus billed minutes at the rate.
    #[must_use]
    pub fn cost(&self) -> Decimal {
        self.fixed_cost + Decimal::from(self.billed_minutes) * self.rate
    }

    /// Month this bill covers.
    #[must_use]
    pub const fn period(&self) -> BillingPeriod {
        self.period
    }

    /// Plan set at rollover, if any.
    #[must_use]
    pub const fn plan(&self) -> Option<PlanLabel> {
        self.plan
    }

    /// Per-minute rate.
    #[must_use]
    pub const fn rate(&self) -> Decimal {
        self.rate
    }

    /// Accumulated flat charges.
    #[must_use]
    pub const fn fixed_cost(&self) -> Decimal {
        self.fixed_cost
    }

    /// Remaining included minutes.
    #[must_use]
    pub const fn free_minutes(&self) -> i64 {
        self.free_minutes
    }

    /// Minutes charged at the per-minute rate.
    #[must_use]
    pub const fn billed_minutes(&self) -> u64 {
        self.billed_minutes
    }

    /// Snapshot of the bill for statements and reports.
    #[must_use]
    pub fn summary(&self) -> BillSummary {
        BillSummary {
            period: self.period,
            plan: self.plan,
            rate: self.rate,
            fixed_cost: self.fixed_cost,
            free_minutes: self.free_minutes,
            billed_minutes: self.billed_minutes,
            total: self.cost(),
        }
    }
}

/// Serializable snapshot of a [`Bill`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillSummary {
    /// Month covered.
    pub period: BillingPeriod,

    /// Plan the bill was issued under.
    pub plan: Option<PlanLabel>,

    /// Per-minute rate.
    pub rate: Decimal,

    /// Flat charges, including deposits and prepaid credit lines.
    pub fixed_cost: Decimal,

    /// Included minutes left unused.
    pub free_minutes: i64,

    /// Minutes charged at the rate.
    pub billed_minutes: u64,

    /// Total owed for the month.
    pub total: Decimal,
}
