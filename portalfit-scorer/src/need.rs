//! Positional-need pillar.
//!
//! Departed rotation players define how urgently the program needs each
//! position. Every candidate is compared with the departures in its bucket
//! and the closest match, scaled by the bucket's urgency, is its need score.

use std::collections::BTreeMap;

use log::debug;
use portalfit_core::{
    CandidateRecord, NeedDetail, Pillar, PillarKind, PillarScore, PillarScores, PositionBucket,
    RosterEntry, Snapshot, Stat,
};

use crate::stats::{mean, normalise_by_max, sample_std};
use crate::{PillarError, ScoringConfig};

const FEATURE_COUNT: usize = 5;

/// Match features and their distance weights: height, box plus/minus,
/// offensive rating, usage and effective field-goal percentage.
pub const MATCH_WEIGHTS: [(&str, f64); FEATURE_COUNT] = [
    ("heightIn", 0.25),
    ("bpm", 0.25),
    ("ortg", 0.20),
    ("usg", 0.15),
    ("efg", 0.15),
];

type Profile = [Option<f64>; FEATURE_COUNT];

/// A roster player who left after the season and played enough to matter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Departure<'a> {
    /// The departed player's roster row.
    pub entry: &'a RosterEntry,
    /// Minutes share (as a fraction) times non-negative box plus/minus.
    pub importance: f64,
}

impl Departure<'_> {
    fn profile(&self) -> Profile {
        let stats = &self.entry.stats;
        [
            self.entry.height_inches.value(),
            Some(stats.bpm.value().unwrap_or_default()),
            stats.ortg.value(),
            stats.usg.value(),
            stats.efg.value(),
        ]
    }
}

fn candidate_profile(candidate: &CandidateRecord) -> Profile {
    let stats = &candidate.stats;
    [
        candidate.height_inches,
        stats.bpm,
        stats.ortg,
        stats.usg,
        stats.efg,
    ]
    .map(Stat::value)
}

/// Departures with at least `min_minutes` percent of team minutes.
///
/// A missing box plus/minus counts as zero.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "importance scales minutes share by impact"
)]
pub fn departures(roster: &[RosterEntry], min_minutes: f64) -> Vec<Departure<'_>> {
    roster
        .iter()
        .filter(|entry| entry.left_after_season)
        .filter_map(|entry| {
            let minutes = entry.stats.min_pct.value().filter(|share| *share >= min_minutes)?;
            let impact = entry.stats.bpm.value().unwrap_or_default().max(0.0);
            Some(Departure {
                entry,
                importance: minutes / 100.0 * impact,
            })
        })
        .collect()
}

/// Share of total departure importance per bucket.
///
/// Empty when no departure carries any importance.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "urgency divides bucket importance by the total"
)]
pub fn urgency(departures: &[Departure<'_>]) -> BTreeMap<PositionBucket, f64> {
    let mut sums: BTreeMap<PositionBucket, f64> = BTreeMap::new();
    for departure in departures {
        *sums.entry(departure.entry.position).or_default() += departure.importance;
    }
    let total: f64 = sums.values().sum();
    if total <= 0.0 {
        return BTreeMap::new();
    }
    sums.into_iter()
        .map(|(bucket, sum)| (bucket, sum / total))
        .collect()
}

/// Pooled mean and deviation per match feature.
///
/// A feature with zero or undefined deviation has no scale and contributes
/// no distance.
#[derive(Debug, Clone, PartialEq)]
struct Reference {
    scales: [Option<(f64, f64)>; FEATURE_COUNT],
}

impl Reference {
    fn pooled(candidates: &[Profile], departures: &[Profile]) -> Self {
        let scales = std::array::from_fn(|feature| {
            let values: Vec<f64> = candidates
                .iter()
                .chain(departures)
                .filter_map(|profile| profile.get(feature).copied().flatten())
                .collect();
            let centre = mean(&values)?;
            let sigma = sample_std(&values).filter(|sigma| *sigma > 0.0)?;
            Some((centre, sigma))
        });
        Self { scales }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "similarity is a weighted z-score distance"
    )]
    fn similarity(&self, left: &Profile, right: &Profile) -> f64 {
        let distance: f64 = MATCH_WEIGHTS
            .iter()
            .zip(&self.scales)
            .zip(left.iter().zip(right))
            .filter_map(|(((_, weight), scale), (a, b))| {
                let (centre, sigma) = (*scale)?;
                let z = |value: f64| (value - centre) / sigma;
                Some(weight * (z((*a)?) - z((*b)?)).abs())
            })
            .sum();
        (-distance).exp()
    }
}

/// Departures, their urgency and the pooled reference for one snapshot.
struct Matching<'a> {
    departed: Vec<Departure<'a>>,
    profiles: Vec<Profile>,
    urgency: BTreeMap<PositionBucket, f64>,
    reference: Reference,
}

impl<'a> Matching<'a> {
    fn new(snapshot: &'a Snapshot, candidate_profiles: &[Profile], min_minutes: f64) -> Self {
        let departed = departures(&snapshot.roster, min_minutes);
        let profiles: Vec<Profile> = departed.iter().map(Departure::profile).collect();
        Self {
            urgency: urgency(&departed),
            reference: Reference::pooled(candidate_profiles, &profiles),
            departed,
            profiles,
        }
    }

    /// Most similar same-bucket departure; ties keep roster order.
    fn best_match(
        &self,
        bucket: PositionBucket,
        profile: &Profile,
    ) -> Option<(&Departure<'a>, f64)> {
        let mut leader: Option<(&Departure<'a>, f64)> = None;
        for (departure, other) in self.departed.iter().zip(&self.profiles) {
            if departure.entry.position != bucket {
                continue;
            }
            let similarity = self.reference.similarity(profile, other);
            if leader.is_none_or(|(_, leading)| similarity > leading) {
                leader = Some((departure, similarity));
            }
        }
        leader
    }
}

/// Scores candidates against the program's departed players.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeedMatcher {
    min_departure_minutes: f64,
    urgency_power: f64,
}

impl NeedMatcher {
    /// Construct a matcher.
    #[must_use]
    pub const fn new(min_departure_minutes: f64, urgency_power: f64) -> Self {
        Self {
            min_departure_minutes,
            urgency_power,
        }
    }

    /// Construct a matcher from the shared configuration.
    #[must_use]
    pub const fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.min_departure_minutes, config.urgency_power)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "need scales the best similarity by urgency"
    )]
    fn score_candidate(
        &self,
        matching: &Matching<'_>,
        candidate: &CandidateRecord,
        profile: &Profile,
    ) -> PillarScore<NeedDetail> {
        let found = matching
            .urgency
            .get(&candidate.position)
            .copied()
            .filter(|share| *share > 0.0)
            .and_then(|share| {
                let (departure, similarity) = matching.best_match(candidate.position, profile)?;
                Some((departure, share.powf(self.urgency_power) * similarity))
            });
        match found {
            Some((departure, raw)) => PillarScore::new(
                candidate.key.clone(),
                raw,
                NeedDetail {
                    matched_to: Some(departure.entry.name.clone()),
                },
            ),
            None => PillarScore::new(candidate.key.clone(), 0.0, NeedDetail::default()),
        }
    }
}

impl Default for NeedMatcher {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

impl Pillar for NeedMatcher {
    type Detail = NeedDetail;
    type Error = PillarError;
    const KIND: PillarKind = PillarKind::Need;

    fn score(&self, snapshot: &Snapshot) -> Result<PillarScores<NeedDetail>, PillarError> {
        let candidate_profiles: Vec<Profile> =
            snapshot.candidates.iter().map(candidate_profile).collect();
        let matching = Matching::new(snapshot, &candidate_profiles, self.min_departure_minutes);
        debug!(
            "scoring need for {} candidates against {} departures",
            snapshot.candidates.len(),
            matching.departed.len()
        );

        let mut scores: PillarScores<NeedDetail> = snapshot
            .candidates
            .iter()
            .zip(&candidate_profiles)
            .filter(|(candidate, _)| !snapshot.is_program_team(&candidate.team_key))
            .map(|(candidate, profile)| self.score_candidate(&matching, candidate, profile))
            .collect();
        normalise_by_max::<Self>(&mut scores);
        Ok(scores)
    }
}
