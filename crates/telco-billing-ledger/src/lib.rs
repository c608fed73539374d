//! Monthly billing runs over many phone lines.
//!
//! This crate drives `telco-billing-core` contracts through a billing run:
//!
//! - **Call logs**: `CallLog`, `LineRecord`, `CallRecord` loaded from JSON
//! - **Lines**: `PhoneLine` keeps a contract and its monthly statements
//! - **Ledger**: `Ledger` routes calls and month ticks, settles cancellations
//! - **Configuration**: `LedgerConfig` read from the environment
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use telco_billing_core::RateTable;
//! use telco_billing_ledger::{CallLog, Ledger};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let log = CallLog::from_json(r#"{
//!     "lines": [
//!         { "number": "867-5309", "contract": { "type": "pay_per_use", "start": "2019-01-01" } }
//!     ],
//!     "calls": [
//!         { "source": "867-5309", "destination": "555-0100",
//!           "started_at": "2019-01-20T09:30:00", "duration_seconds": 600 }
//!     ]
//! }"#)?;
//!
//! let mut ledger = Ledger::new(Arc::new(RateTable::default()));
//! ledger.replay(&log)?;
//!
//! let settlements = ledger.settle_all()?;
//! assert_eq!(settlements[0].amount_owed, rust_decimal::Decimal::new(5050, 2));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod call_log;
pub mod config;
pub mod error;
pub mod ledger;
pub mod line;

pub use call_log::{CallLog, CallRecord, LineRecord};
pub use config::LedgerConfig;
pub use error::{LedgerError, Result};
pub use ledger::Ledger;
pub use line::{PhoneLine, Settlement};
