//! Rate table for all contract types.
//!
//! Contracts never read module-level prices directly. Every fee and rate comes
//! from a [`RateTable`] handed to the contract when it is built, so a billing
//! run can swap in a different price list without touching contract code.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{BillingError, Result};

// ============================================================================
// Constants
// ============================================================================

/// Pay-per-use monthly fee.
pub const DEFAULT_PAYG_MONTHLY_FEE: Decimal = dec!(50.00);

/// Pay-per-use cost per minute.
pub const DEFAULT_PAYG_RATE_PER_MINUTE: Decimal = dec!(0.05);

/// Term monthly fee.
pub const DEFAULT_TERM_MONTHLY_FEE: Decimal = dec!(20.00);

/// One-time term deposit, charged in the first month.
pub const DEFAULT_TERM_DEPOSIT: Decimal = dec!(300.00);

/// Included minutes per month on a term contract.
pub const DEFAULT_TERM_FREE_MINUTES: i64 = 100;

/// Term cost per minute once included minutes are used up.
pub const DEFAULT_TERM_RATE_PER_MINUTE: Decimal = dec!(0.1);

/// Prepaid cost per minute.
pub const DEFAULT_PREPAID_RATE_PER_MINUTE: Decimal = dec!(0.025);

/// Prepaid credit below which the balance is topped up at rollover.
pub const DEFAULT_PREPAID_TOP_UP_THRESHOLD: Decimal = dec!(10.00);

/// Credit added by a prepaid top-up.
pub const DEFAULT_PREPAID_TOP_UP_AMOUNT: Decimal = dec!(25.00);

/// Fees, rates and allowances for every contract type.
///
/// Missing fields fall back to the defaults when deserializing, so a rate file
/// only needs to list the prices it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateTable {
    /// Pay-per-use monthly fee.
    pub payg_monthly_fee: Decimal,

    /// Pay-per-use cost per minute.
    pub payg_rate_per_minute: Decimal,

    /// Term monthly fee.
    pub term_monthly_fee: Decimal,

    /// One-time term deposit.
    pub term_deposit: Decimal,

    /// Included minutes per term month.
    pub term_free_minutes: i64,

    /// Term cost per minute beyond the included minutes.
    pub term_rate_per_minute: Decimal,

    /// Prepaid cost per minute.
    pub prepaid_rate_per_minute: Decimal,

    /// Remaining credit that triggers a top-up.
    pub prepaid_top_up_threshold: Decimal,

    /// Credit added per top-up.
    pub prepaid_top_up_amount: Decimal,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            payg_monthly_fee: DEFAULT_PAYG_MONTHLY_FEE,
            payg_rate_per_minute: DEFAULT_PAYG_RATE_PER_MINUTE,
            term_monthly_fee: DEFAULT_TERM_MONTHLY_FEE,
            term_deposit: DEFAULT_TERM_DEPOSIT,
            term_free_minutes: DEFAULT_TERM_FREE_MINUTES,
            term_rate_per_minute: DEFAULT_TERM_RATE_PER_MINUTE,
            prepaid_rate_per_minute: DEFAULT_PREPAID_RATE_PER_MINUTE,
            prepaid_top_up_threshold: DEFAULT_PREPAID_TOP_UP_THRESHOLD,
            prepaid_top_up_amount: DEFAULT_PREPAID_TOP_UP_AMOUNT,
        }
    }
}

impl RateTable {
    /// Parse a rate table from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::InvalidRateTable`] if the JSON is malformed or a
    /// value fails [`RateTable::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let table: Self =
            serde_json::from_str(json).map_err(|e| BillingError::InvalidRateTable(e.to_string()))?;
        table.validate()?;
        Ok(table)
    }

    /// Load a rate table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::InvalidRateTable`] if the file cannot be read or
    /// its contents are not a valid rate table.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BillingError::InvalidRateTable(format!("{}: {e}", path.display()))
        })?;
        Self::from_json(&contents)
    }

    /// Check that no price, allowance or top-up is negative.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::InvalidRateTable`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let amounts = [
            ("payg_monthly_fee", self.payg_monthly_fee),
            ("payg_rate_per_minute", self.payg_rate_per_minute),
            ("term_monthly_fee", self.term_monthly_fee),
            ("term_deposit", self.term_deposit),
            ("term_rate_per_minute", self.term_rate_per_minute),
            ("prepaid_rate_per_minute", self.prepaid_rate_per_minute),
            ("prepaid_top_up_threshold", self.prepaid_top_up_threshold),
            ("prepaid_top_up_amount", self.prepaid_top_up_amount),
        ];
        if let Some((name, value)) = amounts.iter().find(|(_, v)| *v < Decimal::ZERO) {
            return Err(BillingError::InvalidRateTable(format!(
                "{name} must not be negative, got {value}"
            )));
        }
        if self.term_free_minutes < 0 {
            return Err(BillingError::InvalidRateTable(format!(
                "term_free_minutes must not be negative, got {}",
                self.term_free_minutes
            )));
        }
        Ok(())
    }
}
