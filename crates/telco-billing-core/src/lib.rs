//! Core types for phone-line billing.
//!
//! This crate provides the pieces every billing run is built from:
//!
//! - **Identifiers**: `PhoneNumber`
//! - **Periods**: `BillingPeriod`
//! - **Bills**: `Bill`, `BillSummary`, `PlanLabel`
//! - **Calls**: `Call`
//! - **Rates**: `RateTable`
//! - **Contracts**: the `Contract` trait with `PayPerUseContract`,
//!   `TermContract` and `PrepaidContract`, built from `ContractTerms`
//!
//! # Money
//!
//! All amounts are `rust_decimal::Decimal` in the billing currency.
//! Per-minute rates such as 0.025 stay exact, so a month of calls adds up to
//! the same total no matter how the calls are ordered.
//!
//! # Monthly cycle
//!
//! The driver owns the calendar. Each month it builds a fresh [`Bill`] and
//! hands it to [`Contract::rollover`]; calls made that month go through
//! [`Contract::bill_call`]; when the line closes, [`Contract::cancel`] returns
//! the amount owed.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bill;
pub mod call;
pub mod contract;
pub mod error;
pub mod ids;
pub mod period;
pub mod rates;

pub use bill::{Bill, BillSummary, PlanLabel};
pub use call::Call;
pub use contract::{
    Contract, ContractState, ContractTerms, PayPerUseContract, PrepaidContract, TermContract,
};
pub use error::{BillingError, Result};
pub use ids::{IdError, PhoneNumber};
pub use period::BillingPeriod;
pub use rates::{
    RateTable, DEFAULT_PAYG_MONTHLY_FEE, DEFAULT_PAYG_RATE_PER_MINUTE,
    DEFAULT_PREPAID_RATE_PER_MINUTE, DEFAULT_PREPAID_TOP_UP_AMOUNT,
    DEFAULT_PREPAID_TOP_UP_THRESHOLD, DEFAULT_TERM_DEPOSIT, DEFAULT_TERM_FREE_MINUTES,
    DEFAULT_TERM_MONTHLY_FEE, DEFAULT_TERM_RATE_PER_MINUTE,
};
