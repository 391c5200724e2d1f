//! The immutable input bundle for one ranking run.

use std::collections::HashMap;

use crate::{CandidateRecord, EntityKey, ExternalRating, RosterEntry, TeamSeasonRecord};

/// Every table a ranking run reads, for one program and one recruiting cycle.
///
/// A snapshot is built once by the dataset provider and then only borrowed.
///
/// # Examples
/// ```
/// use portalfit_core::{CandidateRecord, Snapshot};
///
/// let snapshot = Snapshot::new("Illinois", 2025)
///     .with_candidates(vec![CandidateRecord::new("A", "Iowa", "Wing G", 2025)]);
/// assert_eq!(snapshot.candidates.len(), 1);
/// assert!(snapshot.is_program_team(&"illinois".into()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Target program display name.
    pub program: String,
    /// Normalised program key.
    pub program_key: EntityKey,
    /// Season the statistics describe.
    pub season: u16,
    /// Transfer-portal candidates.
    pub candidates: Vec<CandidateRecord>,
    /// The program's own roster for [`Self::season`].
    pub roster: Vec<RosterEntry>,
    /// League-wide team-seasons, possibly spanning several seasons.
    pub team_seasons: Vec<TeamSeasonRecord>,
    /// External reputation ratings.
    pub ratings: Vec<ExternalRating>,
}

impl Snapshot {
    /// Create an empty snapshot for `program` in `season`.
    #[must_use]
    pub fn new(program: &str, season: u16) -> Self {
        Self {
            program: program.to_owned(),
            program_key: EntityKey::new(program),
            season,
            candidates: Vec::new(),
            roster: Vec::new(),
            team_seasons: Vec::new(),
            ratings: Vec::new(),
        }
    }

    /// Replace the candidate table.
    #[must_use]
    pub fn with_candidates(mut self, candidates: Vec<CandidateRecord>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Replace the roster table.
    #[must_use]
    pub fn with_roster(mut self, roster: Vec<RosterEntry>) -> Self {
        self.roster = roster;
        self
    }

    /// Replace the team-season table.
    #[must_use]
    pub fn with_team_seasons(mut self, team_seasons: Vec<TeamSeasonRecord>) -> Self {
        self.team_seasons = team_seasons;
        self
    }

    /// Replace the reputation table.
    #[must_use]
    pub fn with_ratings(mut self, ratings: Vec<ExternalRating>) -> Self {
        self.ratings = ratings;
        self
    }

    /// Report whether `team` is the target program.
    #[must_use]
    pub fn is_program_team(&self, team: &EntityKey) -> bool {
        *team == self.program_key
    }

    /// Team-season rows for `season`.
    pub fn teams_in_season(&self, season: u16) -> impl Iterator<Item = &TeamSeasonRecord> {
        self.team_seasons
            .iter()
            .filter(move |record| record.season == season)
    }

    /// The first team-season row for `team` in `season`.
    #[must_use]
    pub fn team_season(&self, team: &EntityKey, season: u16) -> Option<&TeamSeasonRecord> {
        self.teams_in_season(season).find(|record| record.key == *team)
    }

    /// Index ratings by join key, keeping the first row for each key.
    ///
    /// Returns the index and the keys that appeared more than once. Name
    /// keys can collide for different people; the duplicates let callers
    /// surface that.
    #[must_use]
    pub fn rating_index(&self) -> (HashMap<EntityKey, &ExternalRating>, Vec<EntityKey>) {
        let mut index = HashMap::with_capacity(self.ratings.len());
        let mut duplicates = Vec::new();
        for rating in &self.ratings {
            let key = rating.key();
            if key.is_empty() {
                continue;
            }
            if index.contains_key(&key) {
                duplicates.push(key);
            } else {
                index.insert(key, rating);
            }
        }
        (index, duplicates)
    }
}
