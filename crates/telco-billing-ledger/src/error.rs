//! Error types for the billing ledger.

use telco_billing_core::{BillingError, BillingPeriod, PhoneNumber};

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur while driving a billing run.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A call or cancellation named a line the ledger does not hold.
    #[error("unknown line: {number}")]
    UnknownLine {
        /// The number that was not found.
        number: PhoneNumber,
    },

    /// A line with this number was already added.
    #[error("line already exists: {number}")]
    DuplicateLine {
        /// The duplicated number.
        number: PhoneNumber,
    },

    /// A call or month tick arrived for a month the ledger has already left.
    #[error("out of order: {period} is before the current month {current}")]
    OutOfOrder {
        /// The rejected month.
        period: BillingPeriod,
        /// The ledger's current month.
        current: BillingPeriod,
    },

    /// A line cannot be settled because it has not been billed for any month.
    #[error("line has no bill to settle: {number}")]
    NotBilled {
        /// The unbilled line.
        number: PhoneNumber,
    },

    /// Contract or rate error from the core.
    #[error(transparent)]
    Billing(#[from] BillingError),

    /// Reading an input file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Input JSON could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
