//! Error types for phone-line billing.

use crate::ids::IdError;

/// Result type for billing operations.
pub type Result<T> = std::result::Result<T, BillingError>;

/// Errors that can occur in billing operations.
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    /// A call or cancellation arrived before the contract's first rollover.
    #[error("no active bill: the contract has not been rolled into a month yet")]
    NoActiveBill,

    /// Month outside 1..=12.
    #[error("invalid month: {month}")]
    InvalidMonth {
        /// The rejected month number.
        month: u32,
    },

    /// Term contract whose end does not fall in a later month than its start.
    #[error("invalid term: end {end} must be in a later month than start {start}")]
    InvalidTerm {
        /// The contract start date.
        start: chrono::NaiveDate,
        /// The contract end date.
        end: chrono::NaiveDate,
    },

    /// Rate table with a value that cannot be billed.
    #[error("invalid rate table: {0}")]
    InvalidRateTable(String),

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),
}
