//! Adapters layer.

pub mod csv;
pub mod memory;

pub use self::csv::CsvPlayerStatsStore;
pub use memory::MemoryPlayerStatsStore;
