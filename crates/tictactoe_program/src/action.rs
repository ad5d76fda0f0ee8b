//! First-class play actions.
//!
//! A move is the signer's intent, validated against a record before it is
//! applied.

use super::{Identity, Tile};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A signer asking to place their mark on a tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{} -> {}", signer, tile)]
pub struct Move {
    /// Verified identity that signed the play.
    pub signer: Identity,
    /// Requested tile, not yet bounds-checked.
    pub tile: Tile,
}

impl Move {
    /// Creates a new move.
    pub fn new(signer: Identity, tile: Tile) -> Self {
        Self { signer, tile }
    }

    /// Returns the signer of this move.
    pub fn signer(&self) -> &Identity {
        &self.signer
    }

    /// Returns the requested tile.
    pub fn tile(&self) -> Tile {
        self.tile
    }
}
