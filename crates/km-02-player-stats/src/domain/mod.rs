//! Domain layer: K-rate arithmetic and resolution settings.

pub mod rates;
pub mod source;

pub use rates::{k_per_9, k_rate, stat_row, DEFAULT_K_RATE};
pub use source::{RateSource, RateWindow, ResolvedRate, ResolverConfig};
