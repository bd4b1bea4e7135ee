//! # Shared Types Crate
//!
//! This crate contains the domain entities and the row types written to and
//! read from the pipeline's data directory.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Every file schema exchanged between pipeline
//!   steps is defined here, so a step that writes `historical_ks.csv` and a
//!   step that reads it cannot drift apart.
//! - **Typed identifiers**: Players, teams, games and venues are distinct
//!   newtypes; a `PlayerId` can never be passed where a `GamePk` is expected.
//! - **Lineups are exactly nine**: a `Lineup` cannot be constructed with any
//!   other number of batters.

pub mod entities;
pub mod errors;
pub mod rows;

pub use entities::*;
pub use errors::*;
pub use rows::*;
