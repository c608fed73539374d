//! Common test utilities for billing-run integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use telco_billing_core::{PhoneNumber, RateTable};
use telco_billing_ledger::{CallLog, Ledger};

/// Test harness holding a scratch directory for call logs and rate tables.
pub struct TestHarness {
    /// Temporary directory for input files (kept alive for test duration).
    pub temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with an empty scratch directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    /// Write `contents` to `name` in the scratch directory and return its path.
    pub fn write_file(&self, name: &str, contents: &serde_json::Value) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let json = serde_json::to_string_pretty(contents).expect("Failed to encode JSON");
        std::fs::write(&path, json).expect("Failed to write file");
        path
    }

    /// Write `log` as `calls.json`, load it back and replay it through a
    /// ledger using `rates`.
    pub fn replay(&self, log: &serde_json::Value, rates: RateTable) -> Ledger {
        let path = self.write_file("calls.json", log);
        let log = CallLog::from_path(&path).expect("Failed to load call log");
        let mut ledger = Ledger::new(Arc::new(rates));
        ledger.replay(&log).expect("Failed to replay call log");
        ledger
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a phone number.
pub fn number(s: &str) -> PhoneNumber {
    s.parse().expect("Invalid phone number")
}

/// A call log entry from `source` starting at `started_at`.
pub fn call(source: &str, started_at: &str, duration_seconds: u64) -> serde_json::Value {
    json!({
        "source": source,
        "destination": "555-0000",
        "started_at": started_at,
        "duration_seconds": duration_seconds,
    })
}
