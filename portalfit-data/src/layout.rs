//! File naming for one recruiting cycle's data directory.

use std::ops::RangeInclusive;

use camino::{Utf8Path, Utf8PathBuf};

/// Team-data seasons read by default, including the target season.
pub const DEFAULT_HISTORY_SEASONS: u16 = 4;

/// Lowercase a program name and join its words with `-`.
///
/// # Examples
/// ```
/// use portalfit_data::slug;
///
/// assert_eq!(slug("Illinois"), "illinois");
/// assert_eq!(slug("  Michigan   State "), "michigan-state");
/// ```
#[must_use]
pub fn slug(program: &str) -> String {
    program
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Where each table for a target program and season lives.
///
/// Candidate and reputation files are named for the recruiting cycle, the
/// season after the one the statistics describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    root: Utf8PathBuf,
    program: String,
    season: u16,
    history_seasons: u16,
}

impl DatasetLayout {
    /// Describe the tables under `root` for `program` in `season`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>, program: &str, season: u16) -> Self {
        Self {
            root: root.into(),
            program: program.trim().to_owned(),
            season,
            history_seasons: DEFAULT_HISTORY_SEASONS,
        }
    }

    /// Read `seasons` team-data seasons ending at the target season.
    ///
    /// Zero is treated as one.
    #[must_use]
    pub const fn with_history_seasons(mut self, seasons: u16) -> Self {
        self.history_seasons = if seasons == 0 { 1 } else { seasons };
        self
    }

    /// Data directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Target program display name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Season the statistics describe.
    #[must_use]
    pub const fn season(&self) -> u16 {
        self.season
    }

    /// Recruiting cycle the candidates are available for.
    #[must_use]
    pub const fn cycle(&self) -> u16 {
        self.season.saturating_add(1)
    }

    /// Seasons of team data to read, oldest first.
    #[must_use]
    pub const fn history_years(&self) -> RangeInclusive<u16> {
        let first = self
            .season
            .saturating_sub(self.history_seasons.saturating_sub(1));
        RangeInclusive::new(first, self.season)
    }

    /// Candidate table.
    #[must_use]
    pub fn candidates_path(&self) -> Utf8PathBuf {
        self.root
            .join(format!("transfer-players-{}.json", self.cycle()))
    }

    /// Team-season table for `year`.
    #[must_use]
    pub fn team_data_path(&self, year: u16) -> Utf8PathBuf {
        self.root.join(format!("team-data-{year}.json"))
    }

    /// Program roster table.
    #[must_use]
    pub fn roster_path(&self) -> Utf8PathBuf {
        self.root
            .join(format!("{}-roster-{}.json", slug(&self.program), self.season))
    }

    /// External reputation table.
    #[must_use]
    pub fn ratings_path(&self) -> Utf8PathBuf {
        self.root
            .join(format!("transfers-247sports-{}.json", self.cycle()))
    }

    /// Default location of the ranked output snapshot.
    #[must_use]
    pub fn default_output_path(&self) -> Utf8PathBuf {
        self.root
            .join(format!("transfer-players-{}-merged.json", self.cycle()))
    }
}
