//! Service layer: slate building, projection, caches.

pub mod cache;
pub mod projector;
pub mod slate_builder;

pub use cache::{cache_predictions, load_lineup_cache, online_samples, save_slate, CacheSummary, OnlineSamples};
pub use projector::Projector;
pub use slate_builder::SlateBuilder;
