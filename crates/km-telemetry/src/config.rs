//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for pipeline logging.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to colour pretty output
    pub ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "mlb-k-model".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            ansi: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `KM_SERVICE_NAME`: Service name (default: mlb-k-model)
    /// - `KM_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `KM_JSON_LOGS`: Enable JSON logs (default: false locally, true in containers)
    /// - `NO_COLOR`: Disable ANSI colours in pretty output
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("KM_SERVICE_NAME")
                .unwrap_or_else(|_| "mlb-k-model".to_string()),

            log_level: env::var("KM_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("KM_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(is_container),

            ansi: env::var("NO_COLOR").is_err() && !is_container,
        }
    }

    /// Raise the level for `-v` / `-vv` on the command line.
    ///
    /// An explicit filter directive (anything with `=` or `,`) is left alone.
    pub fn with_verbosity(mut self, verbose: u8) -> Self {
        if self.log_level.contains('=') || self.log_level.contains(',') {
            return self;
        }
        match verbose {
            0 => {}
            1 => self.log_level = "debug".to_string(),
            _ => self.log_level = "trace".to_string(),
        }
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "mlb-k-model");
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
    }

    #[test]
    fn test_verbosity_raises_level() {
        let config = TelemetryConfig::default();
        assert_eq!(config.clone().with_verbosity(0).log_level, "info");
        assert_eq!(config.clone().with_verbosity(1).log_level, "debug");
        assert_eq!(config.with_verbosity(3).log_level, "trace");
    }

    #[test]
    fn test_verbosity_keeps_directives() {
        let config = TelemetryConfig {
            log_level: "km_01_stats_api=trace,info".to_string(),
            ..TelemetryConfig::default()
        };
        assert_eq!(
            config.with_verbosity(2).log_level,
            "km_01_stats_api=trace,info"
        );
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
