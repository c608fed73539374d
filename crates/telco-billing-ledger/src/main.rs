//! Telco billing - replays a call log and settles every line.
//!
//! Reads `CALL_LOG_PATH` and `RATE_TABLE_PATH` from the environment and prints
//! the settlements as JSON on stdout. Logs go to stderr.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use telco_billing_ledger::{CallLog, Ledger, LedgerConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,telco_billing=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting billing run");

    let config = LedgerConfig::from_env()?;
    tracing::info!(
        call_log = %config.call_log_path.display(),
        rate_table = ?config.rate_table_path,
        "Configuration loaded"
    );

    let log = CallLog::from_path(&config.call_log_path)?;
    let mut ledger = Ledger::new(Arc::new(config.rates));
    ledger.replay(&log)?;

    let period = ledger.current_period();
    let settlements = ledger.settle_all()?;
    let total_owed: Decimal = settlements.iter().map(|s| s.amount_owed).sum();
    tracing::info!(lines = settlements.len(), %total_owed, "Billing run complete");

    let report = serde_json::json!({
        "period": period,
        "settlements": settlements,
        "total_owed": total_owed,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
