//! Join pillar results into ranked composite records.

use log::{debug, warn};
use portalfit_core::{
    CompositeRecord, FitScore, NeedDetail, PillarScores, QualityDetail, Snapshot, StyleDetail,
};

use crate::{FitWeights, ScoringConfig};

/// The three pillar result sets for one run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PillarResults {
    /// Quality pillar results.
    pub quality: PillarScores<QualityDetail>,
    /// Style pillar results.
    pub style: PillarScores<StyleDetail>,
    /// Need pillar results.
    pub need: PillarScores<NeedDetail>,
}

/// Blends pillar scores into fit scores and orders the cohort.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aggregator {
    weights: FitWeights,
}

impl Aggregator {
    /// Construct an aggregator with explicit weights.
    #[must_use]
    pub const fn new(weights: FitWeights) -> Self {
        Self { weights }
    }

    /// Construct an aggregator from the shared configuration.
    #[must_use]
    pub const fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.fit_weights)
    }

    /// Produce one record per candidate, highest fit score first.
    ///
    /// Candidates missing from a pillar keep that pillar empty and contribute
    /// zero for it. Equal fit scores keep candidate order.
    #[must_use]
    pub fn aggregate(&self, snapshot: &Snapshot, results: &PillarResults) -> Vec<CompositeRecord> {
        let (ratings, duplicates) = snapshot.rating_index();
        for key in &duplicates {
            warn!("reputation table lists {key} more than once; keeping the first row");
        }

        let mut records: Vec<CompositeRecord> = snapshot
            .candidates
            .iter()
            .map(|candidate| {
                let mut record = CompositeRecord {
                    candidate: candidate.clone(),
                    quality: results.quality.get(&candidate.key).cloned(),
                    style: results.style.get(&candidate.key).cloned(),
                    need: results.need.get(&candidate.key).cloned(),
                    reputation: ratings.get(&candidate.key).map(|rating| (*rating).clone()),
                    fit_score: FitScore::default(),
                };
                record.fit_score = FitScore::from_unit(self.weights.blend(
                    record.quality_score(),
                    record.style_score(),
                    record.need_score(),
                ));
                record
            })
            .collect();
        records.sort_by(|left, right| right.fit_score.cmp(&left.fit_score));
        debug!("aggregated {} composite records", records.len());
        records
    }
}
