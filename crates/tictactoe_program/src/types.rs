//! Core domain types for the tic-tac-toe program.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::tile::Tile;

/// Verified identity of a participant.
///
/// The host establishes identities (signature checks, key derivation) before
/// any instruction reaches the engine. The engine only compares them.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Creates an identity from its host-assigned key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the underlying key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identity {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Mark placed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Mark {
    /// Placed by `players[0]`, who always moves first.
    #[display("X")]
    X,
    /// Placed by `players[1]`.
    #[display("O")]
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Mark used by the player at `index` in the record's player pair.
    pub fn for_player_index(index: usize) -> Self {
        if index == 0 { Mark::X } else { Mark::O }
    }

    /// Index into the player pair of the player using this mark.
    pub fn player_index(self) -> usize {
        match self {
            Mark::X => 0,
            Mark::O => 1,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Nothing placed yet.
    Empty,
    /// Holds a mark. Never changes again.
    Occupied(Mark),
}

/// 3x3 board stored as 9 cells in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at a row-major index (0-8).
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Gets the square under a tile, if the tile is on the board.
    pub fn at(&self, tile: Tile) -> Option<Square> {
        tile.index().and_then(|index| self.get(index))
    }

    /// Checks if the square at `index` is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Square::Empty))
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }

    /// Number of non-empty squares.
    pub fn filled(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Writes `mark` into an empty square.
    ///
    /// Callers validate bounds and emptiness first; occupied squares are left
    /// untouched so a mark can never be overwritten.
    #[instrument(skip(self))]
    pub(crate) fn place(&mut self, index: usize, mark: Mark) {
        if let Some(square @ Square::Empty) = self.squares.get_mut(index) {
            *square = Square::Occupied(mark);
        }
    }

    #[cfg(test)]
    pub(crate) fn overwrite(&mut self, index: usize, square: Square) {
        self.squares[index] = square;
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty squares show their 1-based position.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle state of a game record.
///
/// `Tie` and `Won` are terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    /// Moves are accepted.
    #[display("active")]
    Active,
    /// Board filled without a completed line.
    #[display("tie")]
    Tie,
    /// A player completed a line.
    #[display("won by {}", winner)]
    Won {
        /// Identity of the player who completed the line.
        winner: Identity,
    },
}

impl GameState {
    /// Returns true for `Tie` and `Won`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameState::Active)
    }

    /// Returns the winner, if the game was won.
    pub fn winner(&self) -> Option<&Identity> {
        match self {
            GameState::Won { winner } => Some(winner),
            _ => None,
        }
    }
}
