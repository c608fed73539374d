//! Call log loading.
//!
//! A call log is a JSON document listing the lines signed up for billing and
//! the calls they made:
//!
//! ```json
//! {
//!   "lines": [
//!     { "number": "867-5309", "contract": { "type": "term", "start": "2018-11-15", "end": "2019-11-15" } }
//!   ],
//!   "calls": [
//!     { "source": "867-5309", "destination": "555-0100", "started_at": "2018-11-20T09:30:00", "duration_seconds": 125 }
//!   ]
//! }
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use telco_billing_core::{BillingPeriod, Call, ContractTerms, PhoneNumber};

use crate::Result;

/// A line signed up for billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Phone number of the line.
    pub number: PhoneNumber,

    /// Contract the line was signed up under.
    pub contract: ContractTerms,
}

/// One call as recorded by the switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Calling line; the call is billed to this line.
    pub source: PhoneNumber,

    /// Called number.
    pub destination: PhoneNumber,

    /// When the call started.
    pub started_at: NaiveDateTime,

    /// Length of the call in seconds.
    pub duration_seconds: u64,
}

impl CallRecord {
    /// Month the call is billed in.
    #[must_use]
    pub fn period(&self) -> BillingPeriod {
        BillingPeriod::from_date(self.started_at.date())
    }

    /// The billable view of this record.
    #[must_use]
    pub fn to_call(&self) -> Call {
        Call::new(self.duration_seconds, self.period())
    }
}

/// Lines and calls to replay through a ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallLog {
    /// Lines to sign up before any call is billed.
    #[serde(default)]
    pub lines: Vec<LineRecord>,

    /// Calls, in any order.
    #[serde(default)]
    pub calls: Vec<CallRecord>,
}

impl CallLog {
    /// Parse a call log from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LedgerError::Json`] if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a call log from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LedgerError::Io`] if the file cannot be read, or
    /// [`crate::LedgerError::Json`] if it is malformed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let log = Self::from_json(&contents)?;
        tracing::debug!(
            path = %path.display(),
            lines = log.lines.len(),
            calls = log.calls.len(),
            "Loaded call log"
        );
        Ok(log)
    }

    /// Calls in chronological order. Calls starting at the same moment keep
    /// their order from the log.
    #[must_use]
    pub fn chronological_calls(&self) -> Vec<&CallRecord> {
        let mut calls: Vec<&CallRecord> = self.calls.iter().collect();
        calls.sort_by_key(|call| call.started_at);
        calls
    }
}
