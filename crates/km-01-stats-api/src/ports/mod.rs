//! Ports Layer
//!
//! - Driven Ports (outbound) - the Stats API as seen by the pipeline

pub mod outbound;

pub use outbound::{RosterType, StatWindow, StatsProvider};
