//! Contract-based validation for instructions.
//!
//! Preconditions run before anything is written and decide which rejection a
//! bad instruction gets. Postconditions compare the record before and after a
//! play and are checked in debug builds.

use super::error::{ProgramError, SetupFault};
use super::invariants::{InvariantSet, InvariantViolation, RecordInvariants};
use super::{Board, GameRecord, Identity, Move, Square};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// What a successful precondition check hands to the transition.
    type Checked;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<Self::Checked, ProgramError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Play Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has not reached a terminal state.
pub struct GameIsActive;

impl GameIsActive {
    /// Rejects with `GameAlreadyOver` once the game is won or tied.
    #[instrument(skip(record))]
    pub fn check(record: &GameRecord) -> Result<(), ProgramError> {
        if record.state().is_terminal() {
            Err(ProgramError::GameAlreadyOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the signer is the player whose turn it is.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects with `NotPlayersTurn` for anyone but the current player.
    #[instrument(skip(record))]
    pub fn check(mov: &Move, record: &GameRecord) -> Result<(), ProgramError> {
        if record.players()[record.current_player_index()] != *mov.signer() {
            Err(ProgramError::NotPlayersTurn {
                signer: mov.signer().clone(),
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: the tile lies on the board.
pub struct TileInBounds;

impl TileInBounds {
    /// Returns the row-major index of the tile.
    #[instrument]
    pub fn check(mov: &Move) -> Result<usize, ProgramError> {
        mov.tile()
            .index()
            .ok_or(ProgramError::TileOutOfBounds { tile: mov.tile() })
    }
}

/// Precondition: the target square is empty.
pub struct TileIsEmpty;

impl TileIsEmpty {
    /// Rejects with `TileAlreadySet` when the square holds a mark.
    #[instrument(skip(record))]
    pub fn check(index: usize, mov: &Move, record: &GameRecord) -> Result<(), ProgramError> {
        if record.board().is_empty(index) {
            Ok(())
        } else {
            Err(ProgramError::TileAlreadySet { tile: mov.tile() })
        }
    }
}

/// Composite precondition for a play, checked in rejection order.
pub struct LegalMove;

impl LegalMove {
    /// Validates every precondition and returns the target index.
    #[instrument(skip(record))]
    pub fn check(mov: &Move, record: &GameRecord) -> Result<usize, ProgramError> {
        GameIsActive::check(record)?;
        PlayersTurn::check(mov, record)?;
        let index = TileInBounds::check(mov)?;
        TileIsEmpty::check(index, mov, record)?;
        Ok(index)
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition Properties
// ─────────────────────────────────────────────────────────────

/// Property: squares are write-once between two snapshots.
pub struct WriteOnceBoard;

impl WriteOnceBoard {
    /// True if every square set in `before` is unchanged in `after`.
    pub fn holds(before: &Board, after: &Board) -> bool {
        before
            .squares()
            .iter()
            .zip(after.squares())
            .all(|(b, a)| *b == Square::Empty || b == a)
    }
}

// ─────────────────────────────────────────────────────────────
//  Play Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for `Play`.
///
/// Preconditions: game active, signer's turn, tile on the board, tile empty.
///
/// Postconditions: record invariants hold, squares are write-once, exactly one
/// square was filled.
pub struct PlayContract;

impl Contract<GameRecord, Move> for PlayContract {
    type Checked = usize;

    fn pre(record: &GameRecord, action: &Move) -> Result<usize, ProgramError> {
        LegalMove::check(action, record)
    }

    fn post(before: &GameRecord, after: &GameRecord) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = RecordInvariants::check_all(after).err().unwrap_or_default();

        if !WriteOnceBoard::holds(before.board(), after.board()) {
            violations.push(InvariantViolation::new("Board squares are write-once"));
        }
        if after.board().filled() != before.board().filled() + 1 {
            violations.push(InvariantViolation::new("A play fills exactly one square"));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            warn!(count = violations.len(), "Play postcondition violated");
            Err(violations)
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Setup Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the handle does not hold a record yet.
pub struct RecordIsVacant;

impl RecordIsVacant {
    /// Rejects setup over an existing record.
    #[instrument(skip(existing))]
    pub fn check(existing: Option<&GameRecord>) -> Result<(), ProgramError> {
        match existing {
            Some(_) => Err(ProgramError::InvalidSetup {
                fault: SetupFault::RecordExists,
            }),
            None => Ok(()),
        }
    }
}

/// Precondition: the two players are different identities.
pub struct DistinctPlayers;

impl DistinctPlayers {
    /// Rejects setup when both players are the same identity.
    #[instrument]
    pub fn check(player_one: &Identity, player_two: &Identity) -> Result<(), ProgramError> {
        if player_one == player_two {
            Err(ProgramError::InvalidSetup {
                fault: SetupFault::DuplicatePlayers,
            })
        } else {
            Ok(())
        }
    }
}
