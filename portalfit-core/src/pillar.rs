//! Per-candidate pillar results and the trait every pillar implements.
//!
//! A pillar scores the whole candidate cohort in one pass because every
//! pillar normalises against the cohort maximum. Results are keyed by the
//! candidate's [`EntityKey`]; the aggregator joins them back onto candidates.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::{EntityKey, Snapshot, StatColumn};

/// The three independent scoring dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarKind {
    /// Player quality.
    Quality,
    /// Origin-team stylistic fit.
    Style,
    /// Positional need.
    Need,
}

impl PillarKind {
    /// Lowercase pillar name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Style => "style",
            Self::Need => "need",
        }
    }
}

impl fmt::Display for PillarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One pillar's score for one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct PillarScore<D> {
    /// Candidate join key.
    pub key: EntityKey,
    /// Normalised score in `0.0..=1.0`.
    pub score: f64,
    /// Pillar-specific explanation.
    pub detail: D,
}

impl<D> PillarScore<D> {
    /// Construct a score.
    #[must_use]
    pub const fn new(key: EntityKey, score: f64, detail: D) -> Self {
        Self { key, score, detail }
    }
}

/// Strength and weakness stats against the program's positional baseline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QualityDetail {
    /// Stats closest to the baseline, closest first.
    pub strengths: Vec<StatColumn>,
    /// Stats furthest from the baseline, furthest first.
    pub weaknesses: Vec<StatColumn>,
}

/// Style features closest to and furthest from the program's profile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleDetail {
    /// Feature names closest to the program profile, closest first.
    pub similar: Vec<&'static str>,
    /// Feature names furthest from the program profile, furthest first.
    pub dissimilar: Vec<&'static str>,
}

/// The departed player a candidate most resembles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NeedDetail {
    /// Display name of the best-matching departure, if any.
    pub matched_to: Option<String>,
}

/// A pillar's results for the whole cohort.
///
/// Lookups by key return the first score recorded for that key, so
/// candidates sharing a name resolve to the earliest one.
#[derive(Debug, Clone, PartialEq)]
pub struct PillarScores<D> {
    scores: Vec<PillarScore<D>>,
    index: HashMap<EntityKey, usize>,
}

impl<D> Default for PillarScores<D> {
    fn default() -> Self {
        Self {
            scores: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<D> PillarScores<D> {
    /// An empty result set, used when a pillar degrades.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a score.
    pub fn push(&mut self, score: PillarScore<D>) {
        let position = self.scores.len();
        self.index.entry(score.key.clone()).or_insert(position);
        self.scores.push(score);
    }

    /// Look up the first score for `key`.
    #[must_use]
    pub fn get(&self, key: &EntityKey) -> Option<&PillarScore<D>> {
        self.index
            .get(key)
            .and_then(|position| self.scores.get(*position))
    }

    /// Iterate over scores in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PillarScore<D>> {
        self.scores.iter()
    }

    /// Apply `map` to every score in place.
    pub fn map_scores(&mut self, mut map: impl FnMut(f64) -> f64) {
        for entry in &mut self.scores {
            entry.score = map(entry.score);
        }
    }

    /// Highest score in the set, or `None` when empty.
    #[must_use]
    pub fn max_score(&self) -> Option<f64> {
        self.scores.iter().map(|entry| entry.score).reduce(f64::max)
    }

    /// Number of scored candidates.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.scores.len()
    }

    /// Report whether no candidate was scored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl<D> FromIterator<PillarScore<D>> for PillarScores<D> {
    fn from_iter<I: IntoIterator<Item = PillarScore<D>>>(iter: I) -> Self {
        let mut scores = Self::default();
        for score in iter {
            scores.push(score);
        }
        scores
    }
}

/// Score every candidate in a snapshot along one dimension.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so the pillars can
/// run concurrently, and must:
/// - Produce finite scores in `0.0..=1.0`.
/// - Normalise by the cohort maximum, leaving scores untouched when the
///   maximum is zero.
/// - Report insufficient data for a single candidate as a zero score or an
///   omitted entry, never as an error.
///
/// Errors are reserved for conditions that make the whole pillar unusable.
///
/// # Examples
///
/// ```rust
/// use std::convert::Infallible;
/// use portalfit_core::{Pillar, PillarKind, PillarScore, PillarScores, Snapshot};
///
/// struct Flat;
///
/// impl Pillar for Flat {
///     type Detail = ();
///     type Error = Infallible;
///     const KIND: PillarKind = PillarKind::Quality;
///
///     fn score(&self, snapshot: &Snapshot) -> Result<PillarScores<()>, Infallible> {
///         Ok(snapshot
///             .candidates
///             .iter()
///             .map(|c| PillarScore::new(c.key.clone(), Self::sanitise(1.5), ()))
///             .collect())
///     }
/// }
///
/// assert_eq!(Flat::sanitise(f64::NAN), 0.0);
/// assert_eq!(Flat::sanitise(1.5), 1.0);
/// ```
pub trait Pillar: Send + Sync {
    /// Explanation attached to each score.
    type Detail: Send;
    /// Error raised when the pillar cannot run at all.
    type Error: std::error::Error + Send + Sync + 'static;
    /// Which dimension the pillar scores.
    const KIND: PillarKind;

    /// Score the snapshot's candidate cohort.
    ///
    /// # Errors
    /// Returns [`Self::Error`] when the pillar cannot produce any scores.
    fn score(&self, snapshot: &Snapshot) -> Result<PillarScores<Self::Detail>, Self::Error>;

    /// Clamp and validate a raw score.
    ///
    /// Returns `0.0` for non-finite values and clamps to `0.0..=1.0`.
    #[must_use]
    fn sanitise(score: f64) -> f64 {
        if !score.is_finite() {
            return 0.0;
        }
        score.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn score(name: &str, value: f64) -> PillarScore<()> {
        PillarScore::new(EntityKey::new(name), value, ())
    }

    #[rstest]
    fn first_score_wins_for_shared_keys() {
        let scores: PillarScores<()> =
            [score("Sam", 0.2), score("sam", 0.9), score("Lee", 0.4)].into_iter().collect();

        let found = scores.get(&EntityKey::new("SAM")).expect("score for sam");

        assert_eq!(found.score, 0.2);
        assert_eq!(scores.len(), 3);
        assert_eq!(scores.max_score(), Some(0.9));
    }

    #[rstest]
    fn empty_scores_have_no_maximum() {
        let scores = PillarScores::<()>::empty();
        assert!(scores.is_empty());
        assert_eq!(scores.max_score(), None);
    }
}
