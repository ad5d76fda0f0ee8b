//! Host error types.

use derive_more::{Display, Error};
use tictactoe_program::ProgramError;
use tracing::instrument;

/// What went wrong inside the host.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum HostErrorKind {
    /// The program refused the instruction.
    #[display("instruction rejected: {}", _0)]
    Rejected(ProgramError),
    /// A stored record could not be encoded or decoded.
    #[display("record encoding failed: {}", _0)]
    Encoding(String),
    /// A thread panicked while holding the store lock.
    #[display("record store lock poisoned")]
    LockPoisoned,
}

/// Host error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Host error: {} at {}:{}", kind, file, line)]
pub struct HostError {
    /// Error category.
    pub kind: HostErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl HostError {
    /// Creates a new host error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: HostErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// The program rejection behind this error, if that is what it is.
    pub fn rejection(&self) -> Option<&ProgramError> {
        match &self.kind {
            HostErrorKind::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProgramError> for HostError {
    #[track_caller]
    fn from(err: ProgramError) -> Self {
        Self::new(HostErrorKind::Rejected(err))
    }
}

impl From<bincode::Error> for HostError {
    #[track_caller]
    fn from(err: bincode::Error) -> Self {
        Self::new(HostErrorKind::Encoding(err.to_string()))
    }
}

/// Match script loading error.
#[derive(Debug, Clone, Display, Error)]
#[display("Script error: {} at {}:{}", message, file, line)]
pub struct ScriptError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ScriptError {
    /// Creates a new script error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
