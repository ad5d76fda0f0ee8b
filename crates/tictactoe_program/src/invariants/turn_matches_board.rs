//! Turn counter invariant: `turn - 1` squares are filled.

use super::super::GameRecord;
use super::Invariant;

/// Invariant: exactly `turn - 1` squares are non-empty.
pub struct TurnMatchesBoardInvariant;

impl Invariant<GameRecord> for TurnMatchesBoardInvariant {
    fn holds(record: &GameRecord) -> bool {
        record.turn() >= 1 && record.board().filled() == usize::from(record.turn() - 1)
    }

    fn description() -> &'static str {
        "Filled squares equal turn - 1"
    }
}
