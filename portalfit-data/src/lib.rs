//! Dataset provider for portalfit.
//!
//! Reads the JSON tables for one program and recruiting cycle from a data
//! directory into a [`Snapshot`](portalfit_core::Snapshot), and writes the
//! ranked output snapshot back. [`DatasetLayout`] owns the file naming;
//! filesystem access goes through `cap-std` with `camino` paths.
//!
//! # Examples
//!
//! ```no_run
//! use portalfit_data::{DatasetLayout, load_snapshot};
//!
//! let layout = DatasetLayout::new("data", "Illinois", 2025);
//! let snapshot = load_snapshot(&layout).expect("load dataset");
//! println!("{} candidates", snapshot.candidates.len());
//! ```

#![forbid(unsafe_code)]

mod error;
mod fs;
mod layout;
mod loader;
mod writer;

pub use error::DatasetError;
pub use fs::dir_is_dir;
pub use layout::{DEFAULT_HISTORY_SEASONS, DatasetLayout, slug};
pub use loader::load_snapshot;
pub use writer::write_snapshot;

#[cfg(test)]
mod tests;
