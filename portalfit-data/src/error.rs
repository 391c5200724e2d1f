//! Errors raised while reading dataset tables and writing snapshots.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures of the dataset provider.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A required table could not be opened or read.
    #[error("failed to open {table} table at {path}")]
    OpenTable {
        /// Table being read.
        table: &'static str,
        /// Location of the table.
        path: Utf8PathBuf,
        /// Source error from the filesystem.
        #[source]
        source: std::io::Error,
    },
    /// A table was not a JSON array of objects.
    #[error("failed to parse {table} table at {path}")]
    ParseTable {
        /// Table being read.
        table: &'static str,
        /// Location of the table.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The output directory could not be created.
    #[error("failed to create parent directory for {path}")]
    CreateParent {
        /// Output path whose parent was being created.
        path: Utf8PathBuf,
        /// Source error from the filesystem.
        #[source]
        source: std::io::Error,
    },
    /// The output snapshot could not be written.
    #[error("failed to write snapshot to {path}")]
    WriteSnapshot {
        /// Output path.
        path: Utf8PathBuf,
        /// Source error from the filesystem.
        #[source]
        source: std::io::Error,
    },
    /// The ranked records could not be encoded.
    #[error("failed to serialise snapshot for {path}")]
    SerialiseSnapshot {
        /// Output path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}
