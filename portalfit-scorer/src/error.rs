//! Error types raised by the scoring pillars and their configuration.

use thiserror::Error;

/// Conditions that make a whole pillar unusable for a run.
///
/// Per-candidate data gaps never produce these; they degrade that
/// candidate's score instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PillarError {
    /// No team-season rows were available to fit the style space on.
    #[error("no team-season rows are available to fit the style space")]
    EmptyStyleHistory,
    /// The team-season table cannot support a projection.
    #[error("style space is degenerate: {rows} rows across {features} features")]
    DegenerateStyleSpace {
        /// Number of team-season rows supplied.
        rows: usize,
        /// Number of style features per row.
        features: usize,
    },
    /// The target program has no season with a usable style vector.
    #[error("program {program} has no season with enough style coverage")]
    MissingReference {
        /// Target program display name.
        program: String,
    },
}

/// Reasons a weight set is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeightsError {
    /// A weight was `NaN` or infinite.
    #[error("{set} weights must be finite")]
    NonFinite {
        /// Which weight set failed.
        set: &'static str,
    },
    /// A weight was below zero.
    #[error("{set} weights must not be negative")]
    Negative {
        /// Which weight set failed.
        set: &'static str,
    },
    /// Every weight was zero.
    #[error("{set} weights must not all be zero")]
    ZeroTotal {
        /// Which weight set failed.
        set: &'static str,
    },
}
