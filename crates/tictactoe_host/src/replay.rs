//! Replays a match script through a record store.

use crate::error::HostError;
use crate::script::MatchScript;
use crate::store::MemoryStore;
use serde::Serialize;
use tictactoe_program::{GameRecord, Identity, Instruction};
use tracing::{info, instrument, warn};

/// Result of one instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// The record was updated.
    Applied,
    /// The program refused the instruction, by variant name and message.
    Rejected {
        /// Variant name, e.g. `"TileAlreadySet"`.
        error: String,
        /// Human-readable message.
        message: String,
    },
}

/// Report for one replayed instruction.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// 0 for setup, then 1.. for each play.
    pub step: usize,
    /// Identity that signed the instruction.
    pub signer: Identity,
    /// The instruction submitted.
    pub instruction: Instruction,
    /// Applied or rejected.
    pub outcome: StepOutcome,
    /// Stored record after the step.
    pub record: Option<GameRecord>,
    /// Whether the outcome matched the script's expectation.
    pub as_expected: bool,
}

/// Runs the script's setup and every move against `store`.
///
/// Rejections are reported per step rather than stopping the replay.
///
/// # Errors
///
/// Only store failures (encoding, lock) abort the replay.
#[instrument(skip(store, script), fields(handle = %script.handle()))]
pub fn replay(store: &MemoryStore, script: &MatchScript) -> Result<Vec<StepReport>, HostError> {
    let handle = script.handle();
    let steps = std::iter::once((script.player_one().clone(), script.setup_instruction(), None))
        .chain(script.moves().iter().map(|m| {
            (m.signer().clone(), m.instruction(), m.expect_error().clone())
        }));

    let mut reports = Vec::new();
    for (step, (signer, instruction, expect_error)) in steps.enumerate() {
        let outcome = match store.execute(handle, &signer, &instruction) {
            Ok(_) => StepOutcome::Applied,
            Err(err) => {
                let Some(rejection) = err.rejection().cloned() else {
                    return Err(err);
                };
                StepOutcome::Rejected {
                    error: rejection.name().to_string(),
                    message: rejection.to_string(),
                }
            }
        };

        let as_expected = match (&outcome, &expect_error) {
            (StepOutcome::Applied, None) => true,
            (StepOutcome::Rejected { error, .. }, Some(expected)) => error == expected,
            _ => false,
        };
        if !as_expected {
            warn!(step, ?outcome, ?expect_error, "Step did not go as scripted");
        }

        reports.push(StepReport {
            step,
            signer,
            instruction,
            outcome,
            record: store.get(handle)?,
            as_expected,
        });
    }

    info!(steps = reports.len(), "Replay finished");
    Ok(reports)
}
