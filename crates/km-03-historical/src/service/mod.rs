//! Service layer.

pub mod harvester;

pub use harvester::{save_dataset, Harvest, HistoricalHarvester, DEFAULT_BOXSCORE_DELAY};
