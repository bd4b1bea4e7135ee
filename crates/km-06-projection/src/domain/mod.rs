//! Domain layer: slate shape, name matching, prediction cache rules.

pub mod names;
pub mod predictions;
pub mod slate;

pub use names::{fold_name, NameIndex};
pub use predictions::{append_predictions, join_with_outcomes, replaced_count, Joined};
pub use slate::{
    CachedLineups, LineupCache, PitcherSource, ScheduleRow, Slate, SlateGame, SlateSide,
};
