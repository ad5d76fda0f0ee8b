//! Reference host for the tic-tac-toe program.
//!
//! Owns game records, supplies verified signer identities and gives each
//! instruction exclusive, atomic access to its record. Also loads TOML match
//! scripts and replays them, which is what the `tictactoe` binary does.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod replay;
mod script;
mod store;

pub use error::{HostError, HostErrorKind, ScriptError};
pub use replay::{StepOutcome, StepReport, replay};
pub use script::{MatchScript, ScriptedMove};
pub use store::{MemoryStore, RecordHandle, decode, encode};
