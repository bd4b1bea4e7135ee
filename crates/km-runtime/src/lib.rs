//! # MLB K-Model Runtime
//!
//! Library half of the `mlb-k-model` binary: configuration, CLI, service
//! wiring and command implementations.
//!
//! ## Modular Structure
//!
//! - `config/` - `KmConfig` (defaults, TOML, environment)
//! - `cli/` - `clap` command tree
//! - `container/` - shared services (Stats API client, data layout, metrics)
//! - `commands/` - one function per pipeline command
//!
//! ## Pipeline
//!
//! ```text
//! roster-pull ─► stat-pull ─► combine-stats
//!                                  │
//! build-dataset ─► gen-simulations ─► calibrate ─► models/
//!                                                    │
//! schedule-fetch ─► today-proj ◄─────────────────────┘
//!                       │
//!                       ▼
//!               cache-predictions ─► online-calibrate
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod container;

pub use cli::{Cli, Command};
pub use config::{ConfigError, KmConfig};
pub use container::Container;
