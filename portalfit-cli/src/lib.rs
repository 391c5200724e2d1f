//! Command-line interface for ranking transfer-portal candidates.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod rank;

pub use error::CliError;
use rank::{RankArgs, run_rank};

const ARG_DATA_DIR: &str = "data-dir";
const ARG_SEASON: &str = "season";
const ARG_PROGRAM: &str = "program";
const ARG_OUTPUT: &str = "output";
const ARG_HISTORY_SEASONS: &str = "history-seasons";
const ARG_REPUTATION_WEIGHT: &str = "reputation-weight";
const ARG_PRODUCTION_WEIGHT: &str = "production-weight";
const ARG_COMPETITION_WEIGHT: &str = "competition-weight";
const ARG_TOP: &str = "top";
const ENV_DATA_DIR: &str = "PORTALFIT_CMDS_RANK_DATA_DIR";
const ENV_SEASON: &str = "PORTALFIT_CMDS_RANK_SEASON";
const ENV_PROGRAM: &str = "PORTALFIT_CMDS_RANK_PROGRAM";

/// Run the portalfit CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// dataset cannot be read or written, or the summary cannot be printed.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Rank(args) => run_rank(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "portalfit",
    about = "Rank transfer-portal candidates by fit with a target program",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score every candidate and write the ranked snapshot.
    Rank(RankArgs),
}

#[cfg(test)]
mod tests;
