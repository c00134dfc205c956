//! # Ledger Telemetry
//!
//! Structured logging for the mana ledger crates.
//!
//! The library crates only emit `tracing` events: `debug!` at API
//! boundaries, `trace!` for per-input mana and unlock decisions, and `warn!`
//! when a builder records a deferred error. This crate installs the
//! subscriber that renders them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ledger_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     init_telemetry(&TelemetryConfig::from_env()).expect("Failed to init telemetry");
//!     // Builder and accountant events are now written to stdout
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `mana-ledger` | Service name on the startup event |
//! | `ML_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `ML_CONSOLE_OUTPUT` | `true` | Write events to stdout |
//! | `ML_JSON_LOGS` | `false` (`true` in containers) | JSON lines instead of pretty output |

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install the global tracing subscriber described by `config`.
///
/// Fails with [`TelemetryError::SubscriberInit`] when a subscriber is
/// already installed, so tests should call it at most once per process.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_setup::init_tracing(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_service() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "mana-ledger");
    }
}
