//! Outcome invariant: the recorded state agrees with the board.

use super::super::{GameRecord, GameState, rules};
use super::Invariant;

/// Invariant: `state` matches the lines on the board.
///
/// - `Won { winner }`: winner is a player and their mark completes a line.
/// - `Tie`: board full, no completed line.
/// - `Active`: no completed line.
pub struct OutcomeConsistentInvariant;

impl Invariant<GameRecord> for OutcomeConsistentInvariant {
    fn holds(record: &GameRecord) -> bool {
        let board = record.board();
        match record.state() {
            GameState::Active => rules::check_winner(board).is_none(),
            GameState::Tie => rules::is_tie(board),
            GameState::Won { winner } => record
                .mark_of(winner)
                .is_some_and(|mark| rules::winning_line_for(board, mark)),
        }
    }

    fn description() -> &'static str {
        "Game state agrees with the completed lines on the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Identity, Mark, Move, Tile};

    fn play_all(record: &mut GameRecord, moves: &[(&str, u8, u8)]) {
        for &(signer, row, column) in moves {
            record
                .play(&Move::new(Identity::new(signer), Tile::new(row, column)))
                .unwrap();
        }
    }

    #[test]
    fn test_won_game_holds() {
        let mut record = GameRecord::setup(Identity::new("a"), Identity::new("b")).unwrap();
        play_all(
            &mut record,
            &[("a", 0, 0), ("b", 1, 0), ("a", 0, 1), ("b", 1, 1), ("a", 0, 2)],
        );
        assert!(OutcomeConsistentInvariant::holds(&record));
    }

    #[test]
    fn test_active_with_line_violates() {
        let mut record = GameRecord::setup(Identity::new("a"), Identity::new("b")).unwrap();
        for index in [0, 1, 2] {
            record.board.place(index, Mark::X);
        }
        assert!(!OutcomeConsistentInvariant::holds(&record));
    }

    #[test]
    fn test_winner_outside_players_violates() {
        let mut record = GameRecord::setup(Identity::new("a"), Identity::new("b")).unwrap();
        for index in [0, 1, 2] {
            record.board.place(index, Mark::X);
        }
        record.state = GameState::Won {
            winner: Identity::new("mallory"),
        };
        assert!(!OutcomeConsistentInvariant::holds(&record));
    }

    #[test]
    fn test_mark_of() {
        let record = GameRecord::setup(Identity::new("a"), Identity::new("b")).unwrap();
        assert_eq!(record.mark_of(&Identity::new("a")), Some(Mark::X));
        assert_eq!(record.mark_of(&Identity::new("b")), Some(Mark::O));
        assert_eq!(record.mark_of(&Identity::new("c")), None);
    }
}
