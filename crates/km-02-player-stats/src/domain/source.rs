//! Rate provenance and resolution settings.

use std::fmt;

use chrono::NaiveDate;
use km_01_stats_api::StatWindow;
use shared_types::Season;

use crate::domain::rates::DEFAULT_K_RATE;

/// Where a resolved K-rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateSource {
    Store,
    Api,
    /// Historical simulated K per nine for the pitcher.
    Fallback,
    Default,
}

impl fmt::Display for RateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RateSource::Store => "store",
            RateSource::Api => "api",
            RateSource::Fallback => "fallback",
            RateSource::Default => "default",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRate {
    pub rate: f64,
    pub source: RateSource,
}

/// Which stat window a rate is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RateWindow {
    /// Full season.
    #[default]
    Season,
    /// Trailing `days` ending on the target date.
    Trailing { days: u32 },
}

impl RateWindow {
    pub fn stat_window(self, season: Season, as_of: NaiveDate) -> StatWindow {
        match self {
            RateWindow::Season => StatWindow::Season(season),
            RateWindow::Trailing { days } => StatWindow::trailing(as_of, days),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    pub window: RateWindow,
    pub default_rate: f64,
    /// Write season rates fetched from the API back into the store.
    pub persist_fetched: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            window: RateWindow::Season,
            default_rate: DEFAULT_K_RATE,
            persist_fetched: true,
        }
    }
}
