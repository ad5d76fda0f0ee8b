//! Tic-tac-toe host CLI.

#![warn(missing_docs)]

mod cli;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use tictactoe_host::{MatchScript, MemoryStore, StepOutcome, StepReport, replay};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Replay { script, json } => run_replay(&script, json),
    }
}

/// Replay a match script and report each step
#[instrument]
fn run_replay(path: &Path, json: bool) -> Result<()> {
    let script = MatchScript::from_file(path)?;
    let store = MemoryStore::new();

    info!(handle = %script.handle(), "Replaying match");
    let reports = replay(&store, &script)?;

    for report in &reports {
        if json {
            println!("{}", serde_json::to_string(report)?);
        } else {
            print_report(report);
        }
    }

    let unexpected = reports.iter().filter(|r| !r.as_expected).count();
    if unexpected > 0 {
        bail!("{} step(s) did not go as scripted", unexpected);
    }
    Ok(())
}

fn print_report(report: &StepReport) {
    let flag = if report.as_expected { "" } else { "  [unexpected]" };
    match &report.outcome {
        StepOutcome::Applied => println!(
            "#{} {} {:?}: applied{}",
            report.step, report.signer, report.instruction, flag
        ),
        StepOutcome::Rejected { error, message } => println!(
            "#{} {} {:?}: rejected {} ({}){}",
            report.step, report.signer, report.instruction, error, message, flag
        ),
    }

    if let Some(record) = &report.record {
        println!("turn {} | {}", record.turn(), record.state());
        println!("{}\n", record.board().display());
    }
}
