//! Match scripts: a setup plus a list of signed plays, loaded from TOML.
//!
//! ```toml
//! player_one = "alice"
//! player_two = "bob"
//!
//! [[moves]]
//! signer = "alice"
//! row = 0
//! column = 0
//!
//! [[moves]]
//! signer = "alice"
//! row = 1
//! column = 1
//! expect_error = "NotPlayersTurn"
//! ```

use crate::error::ScriptError;
use crate::store::RecordHandle;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tictactoe_program::{Identity, Instruction, Tile};
use tracing::{debug, info, instrument};

/// A scripted match.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct MatchScript {
    /// Signs the setup and plays X.
    player_one: Identity,

    /// Plays O.
    player_two: Identity,

    /// Record handle the match is stored under.
    #[serde(default = "default_handle")]
    handle: RecordHandle,

    /// Plays in submission order.
    #[serde(default)]
    moves: Vec<ScriptedMove>,
}

/// One signed play in a script.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct ScriptedMove {
    /// Identity signing the play.
    signer: Identity,

    /// Target row.
    row: u8,

    /// Target column.
    column: u8,

    /// Rejection this play must produce, by variant name (e.g. `"TileAlreadySet"`).
    #[serde(default)]
    expect_error: Option<String>,
}

#[instrument]
fn default_handle() -> RecordHandle {
    RecordHandle::new("game")
}

impl MatchScript {
    /// Creates a script with no moves under the default handle.
    #[instrument]
    pub fn new(player_one: Identity, player_two: Identity) -> Self {
        Self {
            player_one,
            player_two,
            handle: default_handle(),
            moves: Vec::new(),
        }
    }

    /// Appends a play expected to succeed.
    pub fn with_move(mut self, signer: Identity, row: u8, column: u8) -> Self {
        self.moves.push(ScriptedMove::new(signer, row, column, None));
        self
    }

    /// Appends a play expected to be rejected with `expect_error`.
    pub fn with_rejected_move(
        mut self,
        signer: Identity,
        row: u8,
        column: u8,
        expect_error: impl Into<String>,
    ) -> Self {
        self.moves
            .push(ScriptedMove::new(signer, row, column, Some(expect_error.into())));
        self
    }

    /// Loads a script from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        debug!("Loading match script from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ScriptError::new(format!("Failed to read script file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parses a script from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ScriptError> {
        let script: Self = toml::from_str(content)
            .map_err(|e| ScriptError::new(format!("Failed to parse script: {}", e)))?;

        info!(
            player_one = %script.player_one,
            player_two = %script.player_two,
            moves = script.moves.len(),
            "Match script loaded"
        );
        Ok(script)
    }

    /// The setup instruction, signed by player one.
    pub fn setup_instruction(&self) -> Instruction {
        Instruction::SetupGame {
            player_two: self.player_two.clone(),
        }
    }
}

impl ScriptedMove {
    /// Creates a scripted play.
    pub fn new(signer: Identity, row: u8, column: u8, expect_error: Option<String>) -> Self {
        Self {
            signer,
            row,
            column,
            expect_error,
        }
    }

    /// The play instruction for this move.
    pub fn instruction(&self) -> Instruction {
        Instruction::Play {
            tile: Tile::new(self.row, self.column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_script() {
        let script = MatchScript::from_toml_str(
            r#"
            player_one = "alice"
            player_two = "bob"
            "#,
        )
        .unwrap();

        assert_eq!(script.player_one(), &Identity::new("alice"));
        assert_eq!(script.handle(), &RecordHandle::new("game"));
        assert!(script.moves().is_empty());
    }

    #[test]
    fn test_parse_moves() {
        let script = MatchScript::from_toml_str(
            r#"
            player_one = "alice"
            player_two = "bob"
            handle = "match-7"

            [[moves]]
            signer = "alice"
            row = 2
            column = 1

            [[moves]]
            signer = "alice"
            row = 0
            column = 0
            expect_error = "NotPlayersTurn"
            "#,
        )
        .unwrap();

        assert_eq!(script.handle(), &RecordHandle::new("match-7"));
        assert_eq!(script.moves().len(), 2);
        assert_eq!(
            script.moves()[0].instruction(),
            Instruction::Play {
                tile: Tile::new(2, 1)
            }
        );
        assert_eq!(
            script.moves()[1].expect_error().as_deref(),
            Some("NotPlayersTurn")
        );
    }

    #[test]
    fn test_missing_player_is_error() {
        let err = MatchScript::from_toml_str(r#"player_one = "alice""#).unwrap_err();
        assert!(err.message.contains("Failed to parse script"));
    }

    #[test]
    fn test_builder() {
        let script = MatchScript::new(Identity::new("a"), Identity::new("b"))
            .with_move(Identity::new("a"), 0, 0)
            .with_rejected_move(Identity::new("a"), 0, 1, "NotPlayersTurn");
        assert_eq!(script.moves().len(), 2);
        assert_eq!(
            script.setup_instruction(),
            Instruction::SetupGame {
                player_two: Identity::new("b")
            }
        );
    }
}
