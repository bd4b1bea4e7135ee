//! Why a game or start was left out of the dataset.

use std::fmt;

use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Game not in `Final` state.
    NotFinal,
    /// Box score request failed.
    BoxErr,
    /// A starting pitcher could not be identified.
    NoStarter,
    /// Starter has no strikeout count.
    KMissing,
    /// Opposing lineup is not nine batters.
    BadLineup,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkipReason::NotFinal => "not_final",
            SkipReason::BoxErr => "box_err",
            SkipReason::NoStarter => "no_sp",
            SkipReason::KMissing => "k_missing",
            SkipReason::BadLineup => "bad_lineup",
        })
    }
}

/// Games (`not_final`, `box_err`, `no_sp`) and starts (`k_missing`,
/// `bad_lineup`) skipped during a harvest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipCounts {
    pub not_final: u64,
    pub box_err: u64,
    pub no_sp: u64,
    pub k_missing: u64,
    pub bad_lineup: u64,
}

impl SkipCounts {
    pub fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::NotFinal => self.not_final += 1,
            SkipReason::BoxErr => self.box_err += 1,
            SkipReason::NoStarter => self.no_sp += 1,
            SkipReason::KMissing => self.k_missing += 1,
            SkipReason::BadLineup => self.bad_lineup += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.not_final + self.box_err + self.no_sp + self.k_missing + self.bad_lineup
    }

    pub fn log(&self) {
        info!(
            not_final = self.not_final,
            box_err = self.box_err,
            no_sp = self.no_sp,
            k_missing = self.k_missing,
            bad_lineup = self.bad_lineup,
            "Harvest skips"
        );
    }
}
