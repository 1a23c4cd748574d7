//! Logging setup for the dashboard binary

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::{DashboardError, Result};

/// Filter directive: `RUST_LOG` wins over the configured level
fn filter_directive(config: &Config, rust_log: Option<String>) -> String {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| config.log_level.clone())
}

/// Install the global subscriber; logs go to stderr so stdout stays free for
/// command output
pub fn init_logging(config: &Config) -> Result<()> {
    let directive = filter_directive(config, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| DashboardError::Config(format!("Invalid log filter '{directive}': {e}")))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| DashboardError::Config(format!("Logging already initialised: {e}")))?;

    tracing::info!(
        "Logging initialised ({} environment, filter '{directive}')",
        config.environment
    );
    Ok(())
}
