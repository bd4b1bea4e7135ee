//! # Pipeline Configuration
//!
//! Unified configuration for every pipeline command.
//!
//! ## Load Order
//!
//! Later sources override earlier ones:
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config`, `KM_CONFIG`, or `./km.toml` when present)
//! 3. Environment variables
//! 4. Command-line flags
//!
//! ## Config File Format
//!
//! ```toml
//! [paths]
//! data_dir = "/app/data"
//! models_dir = "/app/models"
//!
//! [api]
//! base_url = "https://statsapi.mlb.com/api/v1"
//! request_delay_ms = 50
//!
//! [simulation]
//! history_sims = 20000
//! projection_sims = 10000
//! seed = 42
//!
//! [projection]
//! line = 6.5
//! trailing_days = 30
//!
//! [calibration]
//! line = 6.5
//! bins = 10
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use km_01_stats_api::{ClientConfig, DEFAULT_BASE_URL};
use km_02_player_stats::{RateWindow, ResolverConfig, DEFAULT_K_RATE};
use km_04_simulation::{
    LineupOrder, SimConfig, DEFAULT_HISTORY_SIMS, DEFAULT_OUTS_LAMBDA, DEFAULT_PA_PER_OUT,
    DEFAULT_PROJECTION_SIMS, LEAGUE_K_RATE,
};
use km_05_calibration::DEFAULT_BINS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default strikeout line.
pub const DEFAULT_LINE: f64 = 6.5;

/// File looked for in the working directory when no config path is given.
pub const LOCAL_CONFIG_FILE: &str = "km.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for {var}: {value:?}")]
    Env { var: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KmConfig {
    pub paths: PathsConfig,
    pub api: ApiConfig,
    pub simulation: SimulationConfig,
    pub projection: ProjectionConfig,
    pub calibration: CalibrationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
    pub models_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            models_dir: PathBuf::from("models"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// Pause between player stat requests.
    pub request_delay_ms: u64,
    /// Pause between box score requests while harvesting.
    pub boxscore_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 20,
            max_retries: 3,
            request_delay_ms: 50,
            boxscore_delay_ms: 20,
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.max_retries,
            ..ClientConfig::default()
        }
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn boxscore_delay(&self) -> Duration {
        Duration::from_millis(self.boxscore_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub history_sims: u32,
    pub projection_sims: u32,
    pub seed: u64,
    pub outs_lambda: f64,
    pub pa_per_out: f64,
    pub league_rate: f64,
    pub lineup_order: LineupOrder,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            history_sims: DEFAULT_HISTORY_SIMS,
            projection_sims: DEFAULT_PROJECTION_SIMS,
            seed: 42,
            outs_lambda: DEFAULT_OUTS_LAMBDA,
            pa_per_out: DEFAULT_PA_PER_OUT,
            league_rate: LEAGUE_K_RATE,
            lineup_order: LineupOrder::Random,
        }
    }
}

impl SimulationConfig {
    pub fn sim_config(&self, sims: u32) -> SimConfig {
        SimConfig {
            sims,
            outs_lambda: self.outs_lambda,
            pa_per_out: self.pa_per_out,
            league_rate: self.league_rate,
            lineup_order: self.lineup_order,
            seed: self.seed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub line: f64,
    /// Read rates over this many trailing days instead of the season.
    pub trailing_days: Option<u32>,
    /// Rate for players with no usable stats.
    pub default_rate: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            line: DEFAULT_LINE,
            trailing_days: None,
            default_rate: DEFAULT_K_RATE,
        }
    }
}

impl ProjectionConfig {
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            window: match self.trailing_days {
                Some(days) => RateWindow::Trailing { days },
                None => RateWindow::Season,
            },
            default_rate: self.default_rate,
            persist_fetched: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    pub line: f64,
    pub bins: usize,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            line: DEFAULT_LINE,
            bins: DEFAULT_BINS,
        }
    }
}

impl KmConfig {
    /// Parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, then the config file, then the process environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = std::env::var("KM_CONFIG").ok().map(PathBuf::from);
        let path = explicit.map(Path::to_path_buf).or(from_env).or_else(|| {
            let local = PathBuf::from(LOCAL_CONFIG_FILE);
            local.exists().then_some(local)
        });

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Apply `KM_*` overrides read through `get`.
    ///
    /// `KM_HOME` moves both directories under it unless they are set
    /// explicitly.
    pub fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(home) = get("KM_HOME") {
            let home = PathBuf::from(home);
            self.paths.data_dir = home.join("data");
            self.paths.models_dir = home.join("models");
        }
        if let Some(dir) = get("KM_DATA_DIR") {
            self.paths.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get("KM_MODELS_DIR") {
            self.paths.models_dir = PathBuf::from(dir);
        }
        if let Some(url) = get("KM_API_BASE_URL") {
            self.api.base_url = url;
        }
        if let Some(value) = get("KM_SIMS") {
            let sims = parse_env("KM_SIMS", value)?;
            self.simulation.history_sims = sims;
            self.simulation.projection_sims = sims;
        }
        if let Some(value) = get("KM_SEED") {
            self.simulation.seed = parse_env("KM_SEED", value)?;
        }
        if let Some(value) = get("KM_REQUEST_DELAY_MS") {
            self.api.request_delay_ms = parse_env("KM_REQUEST_DELAY_MS", value)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must be http(s), got {}",
                self.api.base_url
            )));
        }
        if self.simulation.history_sims == 0 || self.simulation.projection_sims == 0 {
            return Err(ConfigError::Invalid("simulation sims must be at least 1".into()));
        }
        for (name, line) in [
            ("projection.line", self.projection.line),
            ("calibration.line", self.calibration.line),
        ] {
            if !(line.is_finite() && line > 0.0) {
                return Err(ConfigError::Invalid(format!("{} must be positive, got {}", name, line)));
            }
        }
        if !(self.projection.default_rate > 0.0 && self.projection.default_rate < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "projection.default_rate must be in (0, 1), got {}",
                self.projection.default_rate
            )));
        }
        if self.projection.trailing_days == Some(0) {
            return Err(ConfigError::Invalid("projection.trailing_days must be at least 1".into()));
        }
        if self.calibration.bins == 0 {
            return Err(ConfigError::Invalid("calibration.bins must be at least 1".into()));
        }
        self.simulation
            .sim_config(self.simulation.projection_sims)
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = KmConfig::default();
        config.validate().unwrap();
        assert_eq!(config.projection.line, 6.5);
        assert_eq!(config.simulation.history_sims, 20_000);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("km.toml");
        fs::write(
            &path,
            "[simulation]\nseed = 7\n\n[projection]\nline = 5.5\ntrailing_days = 30\n",
        )
        .unwrap();

        let config = KmConfig::from_file(&path).unwrap();
        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.simulation.projection_sims, 10_000);
        assert_eq!(config.projection.line, 5.5);
        assert_eq!(
            config.projection.resolver_config().window,
            RateWindow::Trailing { days: 30 }
        );
        assert_eq!(config.paths, PathsConfig::default());
    }

    #[test]
    fn test_example_file_matches_defaults() {
        let example: KmConfig = toml::from_str(include_str!("../../../km.toml.example")).unwrap();
        assert_eq!(example, KmConfig::default());
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("km.toml");
        fs::write(&path, "[simulation\nseed = 7").unwrap();
        assert!(matches!(KmConfig::from_file(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = KmConfig::default();
        config
            .apply_env(env(&[
                ("KM_HOME", "/app"),
                ("KM_MODELS_DIR", "/models"),
                ("KM_SIMS", "500"),
                ("KM_SEED", "9"),
                ("KM_REQUEST_DELAY_MS", "0"),
            ]))
            .unwrap();

        assert_eq!(config.paths.data_dir, PathBuf::from("/app/data"));
        assert_eq!(config.paths.models_dir, PathBuf::from("/models"));
        assert_eq!(config.simulation.history_sims, 500);
        assert_eq!(config.simulation.projection_sims, 500);
        assert_eq!(config.simulation.seed, 9);
        assert_eq!(config.api.request_delay(), Duration::ZERO);
    }

    #[test]
    fn test_bad_env_value() {
        let mut config = KmConfig::default();
        let err = config.apply_env(env(&[("KM_SIMS", "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "KM_SIMS", .. }));
    }

    #[test]
    fn test_validate_rejects() {
        let mut config = KmConfig::default();
        config.api.base_url = "statsapi.mlb.com".into();
        assert!(config.validate().is_err());

        let mut config = KmConfig::default();
        config.calibration.bins = 0;
        assert!(config.validate().is_err());

        let mut config = KmConfig::default();
        config.simulation.outs_lambda = -1.0;
        assert!(config.validate().is_err());
    }
}
