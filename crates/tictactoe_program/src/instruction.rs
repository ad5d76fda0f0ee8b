//! Instruction dispatch.
//!
//! The host hands over the current record snapshot (if any), the verified
//! signer and the instruction. The result is the snapshot to commit. Nothing
//! here touches storage.

use super::contracts::RecordIsVacant;
use super::error::ProgramError;
use super::{GameRecord, Identity, Move, Tile};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Instructions accepted by the program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instruction {
    /// Create a record. The signer becomes player one (X).
    SetupGame {
        /// Opponent, who plays O.
        player_two: Identity,
    },
    /// Place the signer's mark.
    Play {
        /// Target tile.
        tile: Tile,
    },
}

/// Applies `instruction` from `signer` to the `current` snapshot.
///
/// Returns the next snapshot on success. On rejection the caller keeps
/// `current` as it was.
///
/// # Errors
///
/// - `InvalidSetup` when setting up over an existing record or with two
///   identical players.
/// - `AccountNotInitialized` when playing against an empty handle.
/// - Any `Play` rejection from [`GameRecord::play`].
#[instrument(skip(current), fields(initialized = current.is_some()))]
pub fn process_instruction(
    current: Option<&GameRecord>,
    signer: &Identity,
    instruction: &Instruction,
) -> Result<GameRecord, ProgramError> {
    let result = match instruction {
        Instruction::SetupGame { player_two } => RecordIsVacant::check(current)
            .and_then(|()| GameRecord::setup(signer.clone(), player_two.clone())),
        Instruction::Play { tile } => match current {
            Some(record) => {
                let mut next = record.clone();
                next.play(&Move::new(signer.clone(), *tile)).map(|()| next)
            }
            None => Err(ProgramError::AccountNotInitialized),
        },
    };

    match &result {
        Ok(record) => info!(turn = record.turn(), state = %record.state(), "Instruction applied"),
        Err(e) => warn!(%signer, error = %e, "Instruction rejected"),
    }

    result
}
