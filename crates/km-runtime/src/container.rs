//! # Pipeline Container
//!
//! Holds the shared services every command draws from.
//!
//! ```text
//! KmConfig ──► DataLayout
//!          └─► StatsApiClient ──► Arc<dyn StatsProvider>
//!                    │
//!                    └── PipelineMetrics (shared with simulators)
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use km_01_stats_api::{StatsApiClient, StatsProvider};
use km_02_player_stats::{CsvPlayerStatsStore, KRateResolver, ResolverConfig};
use km_04_simulation::StartSimulator;
use km_telemetry::{MetricsRecorder, PipelineMetrics};
use shared_store::{DataDirLock, DataLayout};
use shared_types::Season;
use tracing::{debug, info};

use crate::config::KmConfig;

pub struct Container {
    pub config: KmConfig,
    pub layout: DataLayout,
    pub provider: Arc<dyn StatsProvider>,
    pub metrics: Arc<PipelineMetrics>,
}

impl Container {
    /// Wire the live Stats API client.
    pub fn new(config: KmConfig) -> Result<Self> {
        let metrics = Arc::new(PipelineMetrics::new());
        let client = StatsApiClient::new(config.api.client_config(), metrics.clone())
            .context("Failed to create Stats API client")?;
        debug!(base_url = client.base_url(), "Stats API client ready");
        Ok(Self::with_provider(config, Arc::new(client), metrics))
    }

    /// Wire an existing provider (fixtures in tests).
    pub fn with_provider(
        config: KmConfig,
        provider: Arc<dyn StatsProvider>,
        metrics: Arc<PipelineMetrics>,
    ) -> Self {
        let layout = DataLayout::new(&config.paths.data_dir, &config.paths.models_dir);
        Self {
            config,
            layout,
            provider,
            metrics,
        }
    }

    pub fn recorder(&self) -> Arc<dyn MetricsRecorder> {
        self.metrics.clone()
    }

    /// Create the data, cache and models directories and lock the data
    /// directory for this process.
    pub fn lock_data_dir(&self) -> Result<DataDirLock> {
        self.layout
            .ensure_dirs()
            .context("Failed to create data directories")?;
        let lock = DataDirLock::acquire(self.layout.data_dir())
            .with_context(|| format!("Failed to lock {}", self.layout.data_dir().display()))?;
        info!(path = %lock.path().display(), pid = lock.pid(), "Acquired data directory lock");
        Ok(lock)
    }

    /// Stat store for `season`: the season file when it exists, else the
    /// combined file.
    pub fn stat_store(&self, season: Season) -> Result<Arc<CsvPlayerStatsStore>> {
        let season_file = self.layout.player_stats(season);
        let path = if season_file.exists() {
            season_file
        } else {
            self.layout.combined_stats()
        };
        open_store(&path)
    }

    /// Store over the combined multi-season stat file.
    pub fn combined_store(&self) -> Result<Arc<CsvPlayerStatsStore>> {
        open_store(&self.layout.combined_stats())
    }

    pub fn resolver(&self, store: Arc<CsvPlayerStatsStore>, config: ResolverConfig) -> KRateResolver {
        KRateResolver::new(self.provider.clone(), store, config)
    }

    pub fn simulator(&self, sims: u32) -> Result<StartSimulator> {
        let config = self.config.simulation.sim_config(sims);
        StartSimulator::new(config, self.recorder()).context("Invalid simulation settings")
    }
}

fn open_store(path: &Path) -> Result<Arc<CsvPlayerStatsStore>> {
    let store = CsvPlayerStatsStore::open(path)
        .with_context(|| format!("Failed to open stat store {}", path.display()))?;
    Ok(Arc::new(store))
}
