//! Logging and timing for Citra tools
//!
//! Logs go to stderr so stdout stays clean for image data and JSON reports.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Install the global subscriber at the default level
pub fn init() -> anyhow::Result<()> {
    init_with_config(TelemetryConfig::default())
}

/// Install the global subscriber
///
/// `RUST_LOG` wins over `config.log_level` when it parses. Fails on an
/// unparsable level or when a subscriber is already installed.
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = config.filter()?;
    let layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(config.show_target)
        .with_file(config.show_source)
        .with_line_number(config.show_source);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Logging already initialized: {}", e))?;

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        level = %config.log_level,
        "Logging initialized"
    );
    Ok(())
}

/// Identifier shared by every log line of this process
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// How logs are filtered and laid out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `info` or `citra_image=debug`
    pub log_level: String,
    /// Print the module path of each event
    pub show_target: bool,
    /// Print file and line of each event
    pub show_source: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            show_target: false,
            show_source: false,
        }
    }
}

impl TelemetryConfig {
    /// Defaults at `level`
    pub fn with_level(level: impl Into<String>) -> Self {
        Self {
            log_level: level.into(),
            ..Self::default()
        }
    }

    fn filter(&self) -> anyhow::Result<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.log_level)
            .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", self.log_level, e))
    }
}

/// Measures one operation and logs it at debug level when stopped
#[derive(Debug)]
pub struct Timer {
    operation: String,
    started: Instant,
}

impl Timer {
    /// Start timing `operation`
    pub fn start(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            started: Instant::now(),
        }
    }

    /// Operation name
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Time since start
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Log and return the elapsed time
    pub fn stop(self) -> Duration {
        let elapsed = self.elapsed();
        tracing::debug!(
            operation = %self.operation,
            elapsed_ms = elapsed.as_millis() as u64,
            "Operation finished"
        );
        elapsed
    }
}
