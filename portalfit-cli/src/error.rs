//! Error types emitted by the portalfit CLI.
//!
//! Keep this error type reasonably small, as CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use portalfit_data::DatasetError;
use portalfit_scorer::WeightsError;
use thiserror::Error;

/// Errors emitted by the portalfit CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag name of the option.
        field: &'static str,
        /// Environment variable that can supply the option.
        env: &'static str,
    },
    /// The data directory does not exist.
    #[error("data directory {path:?} does not exist")]
    MissingDataDirectory {
        /// Configured data directory.
        path: Utf8PathBuf,
    },
    /// The data directory exists but is not a directory.
    #[error("data directory {path:?} is not a directory")]
    DataDirectoryNotDirectory {
        /// Configured data directory.
        path: Utf8PathBuf,
    },
    /// The data directory could not be inspected due to an IO error.
    #[error("failed to inspect data directory {path:?}: {source}")]
    InspectDataDirectory {
        /// Configured data directory.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The configured quality weights were rejected.
    #[error("invalid scoring weights: {0}")]
    InvalidWeights(#[from] WeightsError),
    /// Loading or writing the dataset failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    /// Printing the ranking summary failed.
    #[error("failed to write ranking summary: {0}")]
    WriteSummary(#[source] std::io::Error),
}
