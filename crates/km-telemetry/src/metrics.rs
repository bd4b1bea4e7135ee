//! Pipeline counters.
//!
//! Every service takes an `Arc<dyn MetricsRecorder>`; commands share one
//! `PipelineMetrics` and log its snapshot when they finish.
//!
//! ```ignore
//! let metrics = Arc::new(PipelineMetrics::new());
//! let client = StatsApiClient::new(config, metrics.clone())?;
//! // ... run the command ...
//! metrics.snapshot().log();
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Thread-safe counters for one pipeline run.
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    /// Stats API requests sent (including retries)
    pub api_requests: AtomicU64,
    /// Requests that ended in an error after all retries
    pub api_failures: AtomicU64,
    /// Retried requests
    pub api_retries: AtomicU64,
    /// Cumulative request time in nanoseconds
    pub api_time_ns: AtomicU64,
    /// Scheduled games looked at while harvesting
    pub games_scanned: AtomicU64,
    /// Starts written to the historical dataset
    pub starts_harvested: AtomicU64,
    /// Starts skipped while harvesting
    pub starts_skipped: AtomicU64,
    /// Starts run through the simulator
    pub starts_simulated: AtomicU64,
    /// Individual games simulated
    pub games_simulated: AtomicU64,
    /// Projection rows produced
    pub projections: AtomicU64,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_api_request(&self, duration: Duration, ok: bool) {
        self.api_requests.fetch_add(1, Ordering::Relaxed);
        self.api_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if !ok {
            self.api_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_api_retry(&self) {
        self.api_retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_game_scanned(&self) {
        self.games_scanned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_start_harvested(&self) {
        self.starts_harvested.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_start_skipped(&self) {
        self.starts_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_start_simulated(&self, games: u64) {
        self.starts_simulated.fetch_add(1, Ordering::Relaxed);
        self.games_simulated.fetch_add(games, Ordering::Relaxed);
    }

    pub fn record_projection(&self) {
        self.projections.fetch_add(1, Ordering::Relaxed);
    }

    /// Average request latency in milliseconds
    pub fn avg_api_ms(&self) -> f64 {
        let total = self.api_time_ns.load(Ordering::Relaxed);
        let count = self.api_requests.load(Ordering::Relaxed);
        if count > 0 {
            total as f64 / count as f64 / 1_000_000.0
        } else {
            0.0
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            api_requests: self.api_requests.load(Ordering::Relaxed),
            api_failures: self.api_failures.load(Ordering::Relaxed),
            api_retries: self.api_retries.load(Ordering::Relaxed),
            avg_api_ms: self.avg_api_ms(),
            games_scanned: self.games_scanned.load(Ordering::Relaxed),
            starts_harvested: self.starts_harvested.load(Ordering::Relaxed),
            starts_skipped: self.starts_skipped.load(Ordering::Relaxed),
            starts_simulated: self.starts_simulated.load(Ordering::Relaxed),
            games_simulated: self.games_simulated.load(Ordering::Relaxed),
            projections: self.projections.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub api_requests: u64,
    pub api_failures: u64,
    pub api_retries: u64,
    pub avg_api_ms: f64,
    pub games_scanned: u64,
    pub starts_harvested: u64,
    pub starts_skipped: u64,
    pub starts_simulated: u64,
    pub games_simulated: u64,
    pub projections: u64,
}

impl MetricsSnapshot {
    /// Emit the snapshot as one `info` event.
    pub fn log(&self) {
        tracing::info!(
            api_requests = self.api_requests,
            api_failures = self.api_failures,
            api_retries = self.api_retries,
            avg_api_ms = format_args!("{:.1}", self.avg_api_ms),
            games_scanned = self.games_scanned,
            starts_harvested = self.starts_harvested,
            starts_skipped = self.starts_skipped,
            starts_simulated = self.starts_simulated,
            games_simulated = self.games_simulated,
            projections = self.projections,
            "Run metrics"
        );
    }
}

/// Trait for metrics recording implementations
pub trait MetricsRecorder: Send + Sync {
    fn record_api_request(&self, duration: Duration, ok: bool);
    fn record_api_retry(&self);
    fn record_game_scanned(&self);
    fn record_start_harvested(&self);
    fn record_start_skipped(&self);
    fn record_start_simulated(&self, games: u64);
    fn record_projection(&self);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_api_request(&self, _: Duration, _: bool) {}
    fn record_api_retry(&self) {}
    fn record_game_scanned(&self) {}
    fn record_start_harvested(&self) {}
    fn record_start_skipped(&self) {}
    fn record_start_simulated(&self, _: u64) {}
    fn record_projection(&self) {}
}

impl MetricsRecorder for PipelineMetrics {
    fn record_api_request(&self, duration: Duration, ok: bool) {
        PipelineMetrics::record_api_request(self, duration, ok);
    }

    fn record_api_retry(&self) {
        PipelineMetrics::record_api_retry(self);
    }

    fn record_game_scanned(&self) {
        PipelineMetrics::record_game_scanned(self);
    }

    fn record_start_harvested(&self) {
        PipelineMetrics::record_start_harvested(self);
    }

    fn record_start_skipped(&self) {
        PipelineMetrics::record_start_skipped(self);
    }

    fn record_start_simulated(&self, games: u64) {
        PipelineMetrics::record_start_simulated(self, games);
    }

    fn record_projection(&self) {
        PipelineMetrics::record_projection(self);
    }
}
