//! Persist the ranked output snapshot.

use std::io::{BufWriter, Write};

use camino::Utf8Path;
use log::info;
use portalfit_core::CompositeRecord;

use crate::DatasetError;
use crate::fs::{create_file, ensure_parent_dir};

/// Write `records` to `path` as a pretty-printed JSON array, replacing any
/// existing file and creating missing parent directories.
///
/// # Errors
/// Returns [`DatasetError::CreateParent`] when the parent directory cannot be
/// created, [`DatasetError::WriteSnapshot`] on I/O failure and
/// [`DatasetError::SerialiseSnapshot`] when encoding fails.
pub fn write_snapshot(path: &Utf8Path, records: &[CompositeRecord]) -> Result<(), DatasetError> {
    let write_error = |source| DatasetError::WriteSnapshot {
        path: path.to_path_buf(),
        source,
    };
    ensure_parent_dir(path).map_err(|source| DatasetError::CreateParent {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(create_file(path).map_err(write_error)?);
    serde_json::to_writer_pretty(&mut writer, records).map_err(|source| {
        DatasetError::SerialiseSnapshot {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.write_all(b"\n").map_err(write_error)?;
    writer.flush().map_err(write_error)?;

    info!("wrote {} ranked records to {path}", records.len());
    Ok(())
}
