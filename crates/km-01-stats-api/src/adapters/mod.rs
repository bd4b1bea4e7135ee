//! Adapters implementing `StatsProvider`.

pub mod http;
pub mod memory;

pub use http::{ClientConfig, StatsApiClient, DEFAULT_BASE_URL};
pub use memory::InMemoryStatsProvider;
