//! Tic-tac-toe program - authoritative rules for signer-authorized games.
//!
//! A match lives in a [`GameRecord`] owned by a host. The host verifies
//! signatures, serializes access to each record and commits the snapshot
//! returned by [`process_instruction`]. This crate only decides whether an
//! instruction is legal and what the next record looks like.
//!
//! # Example
//!
//! ```
//! use tictactoe_program::{GameState, Identity, Instruction, Tile, process_instruction};
//!
//! let alice = Identity::new("alice");
//! let bob = Identity::new("bob");
//!
//! let setup = Instruction::SetupGame { player_two: bob.clone() };
//! let record = process_instruction(None, &alice, &setup)?;
//!
//! let play = Instruction::Play { tile: Tile::new(1, 1) };
//! let record = process_instruction(Some(&record), &alice, &play)?;
//! assert_eq!(record.turn(), 2);
//! assert_eq!(record.state(), &GameState::Active);
//! # Ok::<(), tictactoe_program::ProgramError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod error;
mod instruction;
mod invariants;
mod record;
pub mod rules;
mod tile;
mod types;

pub use action::Move;
pub use contracts::{
    Contract, DistinctPlayers, GameIsActive, LegalMove, PlayContract, PlayersTurn,
    RecordIsVacant, TileInBounds, TileIsEmpty, WriteOnceBoard,
};
pub use error::{ProgramError, SetupFault};
pub use instruction::{Instruction, process_instruction};
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, MarkBalanceInvariant,
    OutcomeConsistentInvariant, RecordInvariants, TurnMatchesBoardInvariant,
};
pub use record::GameRecord;
pub use tile::Tile;
pub use types::{Board, GameState, Identity, Mark, Square};
