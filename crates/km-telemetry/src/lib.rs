//! # KM Telemetry
//!
//! Logging and run metrics for the MLB K-Model pipeline.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use km_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_logging(&config)?;
//!     let span = km_telemetry::pipeline_span!("build-dataset");
//!     let _entered = span.enter();
//!     // ...
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `KM_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `KM_JSON_LOGS` | `true` in containers | JSON log lines |
//! | `KM_SERVICE_NAME` | `mlb-k-model` | Service name in logs |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{init_logging, TelemetryGuard};
pub use metrics::{MetricsRecorder, MetricsSnapshot, NoOpMetrics, PipelineMetrics};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Fresh identifier for one pipeline run.
pub fn new_run_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Span wrapping one pipeline command, tagged with a fresh `run_id`.
///
/// ```rust,ignore
/// let span = km_telemetry::pipeline_span!("today-proj", date = %date);
/// ```
#[macro_export]
macro_rules! pipeline_span {
    ($command:expr) => {
        tracing::info_span!("run", command = $command, run_id = %$crate::new_run_id())
    };
    ($command:expr, $($field:tt)*) => {
        tracing::info_span!("run", command = $command, run_id = %$crate::new_run_id(), $($field)*)
    };
}
