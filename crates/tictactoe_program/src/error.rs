//! Rejections returned by the rules engine.

use derive_more::{Display, Error};

use super::tile::Tile;
use super::types::Identity;

/// Why a `SetupGame` instruction was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SetupFault {
    /// The handle already designates a record.
    #[display("record already exists")]
    RecordExists,
    /// Both player identities are the same.
    #[display("player two must differ from player one")]
    DuplicatePlayers,
}

/// A rejected instruction.
///
/// Every variant is returned before the record is touched, so a rejection
/// always leaves the record exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, strum::IntoStaticStr)]
pub enum ProgramError {
    /// The record cannot be (re)initialized.
    #[display("Invalid setup: {}", fault)]
    InvalidSetup {
        /// Specific reason.
        fault: SetupFault,
    },

    /// The signer is not the player whose turn it is.
    #[display("It's not {}'s turn", signer)]
    NotPlayersTurn {
        /// Identity that signed the rejected play.
        signer: Identity,
    },

    /// The game has already been won or tied.
    #[display("Game is already over")]
    GameAlreadyOver,

    /// Row or column is outside `0..3`.
    #[display("Tile {} is out of bounds", tile)]
    TileOutOfBounds {
        /// Requested tile.
        tile: Tile,
    },

    /// The target square already holds a mark.
    #[display("Tile {} is already set", tile)]
    TileAlreadySet {
        /// Requested tile.
        tile: Tile,
    },

    /// A play was addressed to a handle with no record behind it.
    #[display("Game record is not initialized")]
    AccountNotInitialized,
}

impl ProgramError {
    /// Stable variant name, e.g. `"TileAlreadySet"`.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}
