//! # Error Types
//!
//! Errors raised while constructing domain values.

use thiserror::Error;

/// Errors from validating domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A lineup must contain exactly nine batters.
    #[error("Invalid lineup: expected 9 batters, got {len}")]
    InvalidLineup { len: usize },

    /// Season year outside the supported range or not a number.
    #[error("Invalid season: {0}")]
    InvalidSeason(String),

    /// Player id that is not a non-negative integer.
    #[error("Invalid player id: {0}")]
    InvalidPlayerId(String),
}
