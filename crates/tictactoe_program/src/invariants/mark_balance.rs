//! Mark balance invariant: X moves first, so X leads O by zero or one.

use super::super::{GameRecord, Mark};
use super::Invariant;

/// Invariant: `#X - #O` is 0 or 1.
pub struct MarkBalanceInvariant;

impl Invariant<GameRecord> for MarkBalanceInvariant {
    fn holds(record: &GameRecord) -> bool {
        let x_count = record.board().count(Mark::X);
        let o_count = record.board().count(Mark::O);
        x_count == o_count || x_count == o_count + 1
    }

    fn description() -> &'static str {
        "X count equals O count or exceeds it by one"
    }
}
