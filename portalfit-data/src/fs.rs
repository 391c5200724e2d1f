//! Capability-based filesystem access for dataset tables.

use std::io;
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open a table file, returning `None` when it does not exist.
pub(crate) fn open_if_present(path: &Utf8Path) -> io::Result<Option<fs_utf8::File>> {
    match fs_utf8::File::open_ambient(path, ambient_authority()) {
        Ok(file) => Ok(Some(file)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error),
    }
}

/// Create (or truncate) the file at `path` through its parent directory.
pub(crate) fn create_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other("output path has no file name"))?;
    fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?.create(name)
}

/// Create every missing directory above `path`.
pub(crate) fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent().filter(|dir| !dir.as_str().is_empty()) else {
        return Ok(());
    };
    let (base, relative) = split_anchor(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?.create_dir_all(&relative)
}

/// Report whether `path` exists and is a directory.
///
/// # Errors
/// Returns the underlying I/O error, including `NotFound` when the path or
/// one of its ancestors is absent.
pub fn dir_is_dir(path: &Utf8Path) -> io::Result<bool> {
    let (base, relative) = split_anchor(path)?;
    let anchor = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    if relative.as_str().is_empty() {
        return Ok(true);
    }
    anchor.metadata(&relative).map(|meta| meta.is_dir())
}

/// Split a directory into the ambient anchor cap-std can open and the
/// remainder relative to it.
fn split_anchor(dir: &Utf8Path) -> io::Result<(Utf8PathBuf, Utf8PathBuf)> {
    let mut components = dir.as_std_path().components();
    let anchor = match components.next() {
        Some(Component::Prefix(prefix)) => {
            let drive = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            if matches!(components.clone().next(), Some(Component::RootDir)) {
                components.next();
            }
            Utf8PathBuf::from(drive).join(std::path::MAIN_SEPARATOR_STR)
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR_STR),
        _ => return Ok((Utf8PathBuf::from("."), dir.to_path_buf())),
    };
    let relative = Utf8PathBuf::from_path_buf(components.as_path().to_path_buf())
        .map_err(|_| io::Error::other("non-UTF-8 directory path"))?;
    Ok((anchor, relative))
}
