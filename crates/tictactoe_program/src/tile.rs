//! Board coordinates supplied by a `Play` instruction.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Row/column coordinate on the board.
///
/// Coordinates arrive unchecked from the caller, so a `Tile` may lie outside
/// the board. [`Tile::index`] is the single bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("({}, {})", row, column)]
pub struct Tile {
    /// Row, valid in `0..3`.
    pub row: u8,
    /// Column, valid in `0..3`.
    pub column: u8,
}

impl Tile {
    /// Creates a tile. No bounds check is made here.
    pub fn new(row: u8, column: u8) -> Self {
        Self { row, column }
    }

    /// Row-major board index, or `None` when off the board.
    pub fn index(self) -> Option<usize> {
        if self.row < 3 && self.column < 3 {
            Some(self.row as usize * 3 + self.column as usize)
        } else {
            None
        }
    }

    /// Creates the tile for a row-major board index.
    pub fn from_index(index: usize) -> Option<Self> {
        if index < 9 {
            Some(Self::new((index / 3) as u8, (index % 3) as u8))
        } else {
            None
        }
    }
}
