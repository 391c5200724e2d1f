//! Player-quality pillar.
//!
//! Quality blends three sub-scores per candidate:
//! - **Reputation**: the mean of the internal-ranking percentile and the
//!   normalised external rating, or whichever one exists.
//! - **Production**: a logistic over bucket-standardised box plus/minus, an
//!   efficiency term and a usage penalty.
//! - **Competition**: the origin team's strength percentile for the season.
//!
//! The weighted blend is divided by the cohort maximum. Each candidate also
//! receives the stats closest to and furthest from the program's positional
//! baseline.

use std::collections::{BTreeMap, HashMap};

use log::debug;
use portalfit_core::{
    CandidateRecord, EntityKey, ExternalRating, Pillar, PillarKind, PillarScore, PillarScores,
    PositionBucket, QualityDetail, RosterEntry, Snapshot, StatColumn,
};

use crate::stats::{extremes, logistic, mean, non_zero_scale, normalise_by_max, sample_std};
use crate::{PillarError, QualityWeights, ScoringConfig};

/// Competition sub-score when the origin team-season is unknown.
pub const UNKNOWN_COMPETITION: f64 = 0.5;

/// Scores candidate quality against the cohort and the program roster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityScorer {
    weights: QualityWeights,
    explain_count: usize,
}

impl QualityScorer {
    /// Construct a scorer with explicit weights.
    #[must_use]
    pub const fn new(weights: QualityWeights, explain_count: usize) -> Self {
        Self {
            weights,
            explain_count,
        }
    }

    /// Construct a scorer from the shared configuration.
    #[must_use]
    pub const fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.quality_weights, config.explain_count)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "the quality blend is a weighted sum"
    )]
    fn blend(&self, reputation: f64, production: Option<f64>, competition: f64) -> f64 {
        self.weights.reputation * reputation
            + self.weights.production * production.unwrap_or_default()
            + self.weights.competition * competition
    }
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

impl Pillar for QualityScorer {
    type Detail = QualityDetail;
    type Error = PillarError;
    const KIND: PillarKind = PillarKind::Quality;

    fn score(&self, snapshot: &Snapshot) -> Result<PillarScores<QualityDetail>, PillarError> {
        let cohort = snapshot.candidates.len();
        debug!("scoring quality for {cohort} candidates");

        let (ratings, _) = snapshot.rating_index();
        let production_by_candidate = production_scores(&snapshot.candidates);
        let baselines = PositionBaselines::from_roster(&snapshot.roster);

        let mut scores: PillarScores<QualityDetail> = snapshot
            .candidates
            .iter()
            .zip(production_by_candidate)
            .map(|(candidate, production)| {
                let reputation = reputation_score(candidate, cohort, &ratings);
                let competition = competition_score(snapshot, candidate);
                let raw = self.blend(reputation, production, competition);
                let detail = baselines.explain(candidate, self.explain_count);
                PillarScore::new(candidate.key.clone(), raw, detail)
            })
            .collect();
        normalise_by_max::<Self>(&mut scores);
        Ok(scores)
    }
}

/// Internal-ranking percentile, `1 - (rank - 1) / (n - 1)`, clamped to the
/// unit interval.
///
/// A single-candidate cohort scores 1.0.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "percentiles divide ranks by the cohort size"
)]
pub fn rank_percentile(rank: f64, cohort: usize) -> f64 {
    if cohort <= 1 {
        return 1.0;
    }
    let span = (cohort - 1) as f64;
    (1.0 - (rank - 1.0) / span).clamp(0.0, 1.0)
}

#[expect(
    clippy::float_arithmetic,
    reason = "two reputation signals are averaged"
)]
fn reputation_score(
    candidate: &CandidateRecord,
    cohort: usize,
    ratings: &HashMap<EntityKey, &ExternalRating>,
) -> f64 {
    let percentile = candidate
        .rank
        .value()
        .map(|rank| rank_percentile(rank, cohort));
    let external = ratings
        .get(&candidate.key)
        .and_then(|rating| rating.normalised_rating());
    match (percentile, external) {
        (Some(internal), Some(rating)) => (internal + rating) / 2.0,
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => 0.0,
    }
}

/// Production sub-scores in candidate order.
///
/// A candidate missing box plus/minus, offensive rating or usage has no
/// production score.
#[expect(
    clippy::float_arithmetic,
    reason = "production combines standardised and rescaled statistics"
)]
fn production_scores(candidates: &[CandidateRecord]) -> Vec<Option<f64>> {
    let mut buckets: BTreeMap<PositionBucket, Vec<f64>> = BTreeMap::new();
    for candidate in candidates {
        if let Some(bpm) = candidate.stats.bpm.value() {
            buckets.entry(candidate.position).or_default().push(bpm);
        }
    }
    let moments: BTreeMap<PositionBucket, (f64, f64)> = buckets
        .into_iter()
        .filter_map(|(bucket, values)| {
            let centre = mean(&values)?;
            Some((bucket, (centre, non_zero_scale(sample_std(&values)))))
        })
        .collect();

    candidates
        .iter()
        .map(|candidate| {
            let stats = &candidate.stats;
            let bpm = stats.bpm.value()?;
            let ortg = stats.ortg.value()?;
            let usg = stats.usg.value()?;
            let (centre, scale) = moments.get(&candidate.position).copied()?;
            let standardised = (bpm - centre) / scale;
            let efficiency = (ortg - 100.0) / 25.0;
            let usage_penalty = ((usg - 20.0).abs() - 5.0).max(0.0) / 15.0;
            Some(logistic(0.3 * standardised + 0.04 * efficiency - 2.0 * usage_penalty))
        })
        .collect()
}

/// Share of same-season teams rated below the candidate's origin team.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "competition is a fraction of team counts"
)]
fn competition_score(snapshot: &Snapshot, candidate: &CandidateRecord) -> f64 {
    let Some(origin) = snapshot
        .team_season(&candidate.team_key, snapshot.season)
        .and_then(|record| record.strength.value())
    else {
        return UNKNOWN_COMPETITION;
    };
    let (below, total) = snapshot
        .teams_in_season(snapshot.season)
        .fold((0_usize, 0_usize), |(below, total), record| {
            let weaker = record.strength.value().is_some_and(|strength| strength < origin);
            (below + usize::from(weaker), total + 1)
        });
    if total == 0 {
        return UNKNOWN_COMPETITION;
    }
    below as f64 / total as f64
}

type Baseline = [Option<f64>; StatColumn::ALL.len()];

/// Program stat means per position bucket, plus a pooled baseline.
#[derive(Debug, Clone, PartialEq)]
struct PositionBaselines {
    by_bucket: BTreeMap<PositionBucket, Baseline>,
    pooled: Option<Baseline>,
}

impl PositionBaselines {
    fn from_roster(roster: &[RosterEntry]) -> Self {
        let mut grouped: BTreeMap<PositionBucket, Vec<&RosterEntry>> = BTreeMap::new();
        for entry in roster {
            grouped.entry(entry.position).or_default().push(entry);
        }
        let by_bucket = grouped
            .into_iter()
            .map(|(bucket, entries)| (bucket, baseline(entries.iter().copied())))
            .collect();
        let pooled = (!roster.is_empty()).then(|| baseline(roster.iter()));
        Self { by_bucket, pooled }
    }

    fn for_bucket(&self, bucket: PositionBucket) -> Option<&Baseline> {
        self.by_bucket.get(&bucket).or_else(|| {
            let guard_fallback = (bucket == PositionBucket::PointGuard)
                .then(|| self.by_bucket.get(&PositionBucket::ShootingGuard))
                .flatten();
            guard_fallback.or(self.pooled.as_ref())
        })
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "deviations subtract the baseline mean"
    )]
    fn explain(&self, candidate: &CandidateRecord, count: usize) -> QualityDetail {
        let Some(baseline) = self.for_bucket(candidate.position) else {
            return QualityDetail::default();
        };
        let deviations: Vec<(StatColumn, f64)> = StatColumn::ALL
            .iter()
            .zip(baseline)
            .filter_map(|(column, centre)| {
                let value = candidate.stats.get(*column).value()?;
                Some((*column, (value - (*centre)?).abs()))
            })
            .collect();
        let (strengths, weaknesses) = extremes(&deviations, count);
        QualityDetail {
            strengths,
            weaknesses,
        }
    }
}

fn baseline<'a>(entries: impl Iterator<Item = &'a RosterEntry> + Clone) -> Baseline {
    StatColumn::ALL.map(|column| {
        let values: Vec<f64> = entries
            .clone()
            .filter_map(|entry| entry.stats.get(column).value())
            .collect();
        mean(&values)
    })
}

#[cfg(test)]
mod tests {
    use portalfit_core::{STYLE_FEATURE_COUNT, Stat, TeamSeasonRecord};
    use rstest::{fixture, rstest};

    use super::*;

    #[expect(clippy::float_arithmetic, reason = "tolerance comparison")]
    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    fn candidate(name: &str, team: &str, role: &str) -> CandidateRecord {
        CandidateRecord::new(name, team, role, 2025)
    }

    #[rstest]
    #[case(1.0, 5, 1.0)]
    #[case(3.0, 5, 0.5)]
    #[case(5.0, 5, 0.0)]
    #[case(9.0, 5, 0.0)]
    #[case(1.0, 1, 1.0)]
    fn percentile_spans_the_cohort(#[case] rank: f64, #[case] cohort: usize, #[case] expected: f64) {
        assert!(close(rank_percentile(rank, cohort), expected));
    }

    #[rstest]
    fn reputation_uses_whichever_signals_exist() {
        let rating = ExternalRating::new("Both", 0.8);
        let external_only = ExternalRating::new("Rated", 0.6);
        let mut ratings = HashMap::new();
        ratings.insert(EntityKey::new("Both"), &rating);
        ratings.insert(EntityKey::new("Rated"), &external_only);

        let both = candidate("Both", "Iowa", "Wing F").with_rank(1.0);
        let ranked = candidate("Ranked", "Iowa", "Wing F").with_rank(3.0);
        let rated = candidate("Rated", "Iowa", "Wing F");
        let neither = candidate("Neither", "Iowa", "Wing F");

        assert!(close(reputation_score(&both, 3, &ratings), 0.9));
        assert!(close(reputation_score(&ranked, 3, &ratings), 0.0));
        assert!(close(reputation_score(&rated, 3, &ratings), 0.6));
        assert!(close(reputation_score(&neither, 3, &ratings), 0.0));
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        clippy::indexing_slicing,
        reason = "expected values are computed inline over a known cohort"
    )]
    fn production_standardises_within_buckets() {
        let candidates = vec![
            candidate("A", "Iowa", "Pure PG")
                .with_stat(StatColumn::Bpm, 4.0)
                .with_stat(StatColumn::Ortg, 125.0)
                .with_stat(StatColumn::Usg, 20.0),
            candidate("B", "Iowa", "Scoring PG")
                .with_stat(StatColumn::Bpm, 2.0)
                .with_stat(StatColumn::Ortg, 100.0)
                .with_stat(StatColumn::Usg, 30.0),
            candidate("C", "Iowa", "C")
                .with_stat(StatColumn::Bpm, 7.0)
                .with_stat(StatColumn::Ortg, 100.0)
                .with_stat(StatColumn::Usg, 20.0),
            candidate("D", "Iowa", "C").with_stat(StatColumn::Bpm, 1.0),
        ];

        let scores = production_scores(&candidates);

        let z = 1.0 / 2.0_f64.sqrt();
        assert!(close(scores[0].expect("A"), logistic(0.3 * z + 0.04)));
        assert!(close(scores[1].expect("B"), logistic(-0.3 * z - 2.0 / 3.0)));
        assert!(close(scores[2].expect("C"), logistic(0.3 * 3.0_f64 / 18.0_f64.sqrt())));
        assert_eq!(scores[3], None);
    }

    #[rstest]
    fn single_value_buckets_are_centred_without_scaling() {
        let candidates = vec![
            candidate("Solo", "Iowa", "Wing F")
                .with_stat(StatColumn::Bpm, 6.0)
                .with_stat(StatColumn::Ortg, 100.0)
                .with_stat(StatColumn::Usg, 20.0),
        ];

        let scores = production_scores(&candidates);

        assert_eq!(scores, vec![Some(0.5)]);
    }

    #[fixture]
    fn league() -> Snapshot {
        let features = [Stat::MISSING; STYLE_FEATURE_COUNT];
        Snapshot::new("Illinois", 2025).with_team_seasons(vec![
            TeamSeasonRecord::new("Illinois", 2025, features).with_strength(0.9),
            TeamSeasonRecord::new("Iowa", 2025, features).with_strength(0.7),
            TeamSeasonRecord::new("Purdue", 2025, features).with_strength(0.5),
            TeamSeasonRecord::new("Duke", 2025, features),
            TeamSeasonRecord::new("Iowa", 2024, features).with_strength(0.1),
        ])
    }

    #[rstest]
    fn competition_is_a_same_season_percentile(league: Snapshot) {
        let iowa = candidate("A", "Iowa", "Wing F");
        let illinois = candidate("B", "illinois", "Wing F");
        let unknown = candidate("C", "Nowhere State", "Wing F");
        let unrated = candidate("D", "Duke", "Wing F");

        assert!(close(competition_score(&league, &iowa), 0.25));
        assert!(close(competition_score(&league, &illinois), 0.5));
        assert!(close(competition_score(&league, &unknown), UNKNOWN_COMPETITION));
        assert!(close(competition_score(&league, &unrated), UNKNOWN_COMPETITION));
    }

    fn roster() -> Vec<RosterEntry> {
        vec![
            RosterEntry::new("Guard", "Combo G")
                .with_stat(StatColumn::Bpm, 5.0)
                .with_stat(StatColumn::Ortg, 110.0)
                .with_stat(StatColumn::Usg, 22.0)
                .with_stat(StatColumn::Efg, 50.0),
            RosterEntry::new("Big", "PF/C")
                .with_stat(StatColumn::Bpm, 1.0)
                .with_stat(StatColumn::Ortg, 100.0)
                .with_stat(StatColumn::Usg, 18.0)
                .with_stat(StatColumn::Efg, 60.0),
        ]
    }

    #[rstest]
    fn point_guards_fall_back_to_the_shooting_guard_baseline() {
        let baselines = PositionBaselines::from_roster(&roster());
        let point_guard = candidate("PG", "Iowa", "Pure PG")
            .with_stat(StatColumn::Bpm, 5.5)
            .with_stat(StatColumn::Ortg, 120.0)
            .with_stat(StatColumn::Usg, 22.0)
            .with_stat(StatColumn::Efg, 47.0);

        let detail = baselines.explain(&point_guard, 3);

        assert_eq!(
            detail.strengths,
            vec![StatColumn::Usg, StatColumn::Bpm, StatColumn::Efg]
        );
        assert_eq!(
            detail.weaknesses,
            vec![StatColumn::Ortg, StatColumn::Efg, StatColumn::Bpm]
        );
    }

    #[rstest]
    fn unrepresented_buckets_use_the_pooled_baseline() {
        let baselines = PositionBaselines::from_roster(&roster());
        let center = candidate("Wing", "Iowa", "Wing F")
            .with_stat(StatColumn::Bpm, 3.0)
            .with_stat(StatColumn::Ortg, 120.0);

        let detail = baselines.explain(&center, 3);

        assert_eq!(detail.strengths, vec![StatColumn::Bpm, StatColumn::Ortg]);
        assert_eq!(detail.weaknesses, vec![StatColumn::Ortg, StatColumn::Bpm]);
    }

    #[rstest]
    fn empty_roster_reports_nothing() {
        let baselines = PositionBaselines::from_roster(&[]);
        let anyone = candidate("A", "Iowa", "Wing F").with_stat(StatColumn::Bpm, 3.0);
        assert_eq!(baselines.explain(&anyone, 3), QualityDetail::default());
    }

    #[rstest]
    fn cohort_leader_scores_one(league: Snapshot) {
        let snapshot = league.with_candidates(vec![
            candidate("Leader", "Illinois", "Wing F").with_rank(1.0),
            candidate("Trailer", "Purdue", "Wing F").with_rank(2.0),
        ]);

        let scores = QualityScorer::default().score(&snapshot).expect("quality scores");

        let leader = scores.get(&EntityKey::new("leader")).expect("leader score");
        let trailer = scores.get(&EntityKey::new("trailer")).expect("trailer score");
        assert!(close(leader.score, 1.0));
        assert!(trailer.score < leader.score);
    }
}
