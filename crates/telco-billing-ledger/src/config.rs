//! Billing run configuration.

use std::path::PathBuf;
use telco_billing_core::RateTable;

use crate::{LedgerError, Result};

/// Default call log location, relative to the working directory.
pub const DEFAULT_CALL_LOG_PATH: &str = "calls.json";

/// Billing run configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Path to the JSON call log (default: `calls.json`).
    pub call_log_path: PathBuf,

    /// Path to a JSON rate table, if one was configured.
    pub rate_table_path: Option<PathBuf>,

    /// Rates in effect for the run.
    pub rates: RateTable,
}

impl LedgerConfig {
    /// Load configuration from the process environment.
    ///
    /// - `CALL_LOG_PATH`: call log to replay.
    /// - `RATE_TABLE_PATH`: optional rate table; standard rates otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Config`] if a variable is empty or the rate table
    /// cannot be loaded.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps variable names to values.
    ///
    /// # Errors
    ///
    /// Same as [`LedgerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let call_log_path = match lookup("CALL_LOG_PATH") {
            Some(path) if path.trim().is_empty() => {
                return Err(LedgerError::Config("CALL_LOG_PATH is empty".into()));
            }
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CALL_LOG_PATH),
        };

        let rate_table_path = lookup("RATE_TABLE_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let rates = match &rate_table_path {
            Some(path) => {
                let rates = RateTable::from_path(path)
                    .map_err(|e| LedgerError::Config(e.to_string()))?;
                tracing::info!(path = %path.display(), "Loaded rate table from file");
                rates
            }
            None => {
                tracing::debug!("RATE_TABLE_PATH not set, using standard rates");
                RateTable::default()
            }
        };

        Ok(Self {
            call_log_path,
            rate_table_path,
            rates,
        })
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            call_log_path: PathBuf::from(DEFAULT_CALL_LOG_PATH),
            rate_table_path: None,
            rates: RateTable::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = LedgerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, LedgerConfig::default());
    }

    #[test]
    fn call_log_path_override() {
        let config = LedgerConfig::from_lookup(lookup(&[("CALL_LOG_PATH", "/data/jan.json")]))
            .unwrap();
        assert_eq!(config.call_log_path, PathBuf::from("/data/jan.json"));
    }

    #[test]
    fn empty_call_log_path_is_rejected() {
        let err = LedgerConfig::from_lookup(lookup(&[("CALL_LOG_PATH", " ")])).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }

    #[test]
    fn rate_table_loaded_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "payg_monthly_fee": 42.5 }}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = LedgerConfig::from_lookup(lookup(&[("RATE_TABLE_PATH", path.as_str())])).unwrap();
        assert_eq!(config.rates.payg_monthly_fee, dec!(42.5));
        assert_eq!(config.rate_table_path, Some(PathBuf::from(path)));
    }

    #[test]
    fn unreadable_rate_table_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("rates.json");
        let missing = missing.to_str().unwrap();

        let err = LedgerConfig::from_lookup(lookup(&[("RATE_TABLE_PATH", missing)])).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }
}
