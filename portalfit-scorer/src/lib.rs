//! Scoring engine for portalfit transfer-portal rankings.
//!
//! Three independent pillars score every candidate in a
//! [`Snapshot`](portalfit_core::Snapshot):
//! - [`QualityScorer`] blends internal-ranking and external reputation,
//!   bucket-standardised production and origin-team competition.
//! - [`StyleScorer`] fits a principal-component style space over league
//!   team-seasons and compares each origin team with the program's
//!   multi-season reference vector.
//! - [`NeedMatcher`] weighs the program's departures by minutes and impact
//!   and matches each candidate to the closest departed player.
//!
//! [`Aggregator`] joins the three result sets into ranked
//! [`CompositeRecord`]s. [`rank_candidates`] runs the whole pipeline, with
//! the pillars computed concurrently.
//!
//! # Examples
//!
//! ```
//! use portalfit_core::Snapshot;
//! use portalfit_scorer::{ScoringConfig, rank_candidates};
//!
//! let snapshot = Snapshot::new("Illinois", 2025);
//! let ranked = rank_candidates(&snapshot, &ScoringConfig::default());
//! assert!(ranked.is_empty());
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use log::{debug, warn};
use portalfit_core::{CompositeRecord, Pillar, PillarScores, Snapshot};

mod aggregate;
mod error;
mod need;
pub mod pca;
mod quality;
pub mod stats;
mod style;
mod types;

pub use aggregate::{Aggregator, PillarResults};
pub use error::{PillarError, WeightsError};
pub use need::{Departure, MATCH_WEIGHTS, NeedMatcher, departures, urgency};
pub use quality::{QualityScorer, UNKNOWN_COMPETITION, rank_percentile};
pub use style::{StyleModel, StyleReference, StyleScorer};
pub use types::{FitWeights, QualityWeights, ScoringConfig};

/// Run one pillar, substituting an empty result when it cannot score.
pub fn run_pillar<P: Pillar>(pillar: &P, snapshot: &Snapshot) -> PillarScores<P::Detail> {
    match pillar.score(snapshot) {
        Ok(scores) => {
            debug!("{} pillar scored {} candidates", P::KIND, scores.len());
            scores
        }
        Err(error) => {
            warn!("{} pillar degraded to zero scores: {error}", P::KIND);
            PillarScores::empty()
        }
    }
}

/// Score every pillar and return the candidates ranked by fit score.
///
/// The three pillars run concurrently over the borrowed snapshot. A pillar
/// that fails is logged and contributes zero for every candidate.
#[must_use]
pub fn rank_candidates(snapshot: &Snapshot, config: &ScoringConfig) -> Vec<CompositeRecord> {
    let quality = QualityScorer::from_config(config);
    let style = StyleScorer::from_config(config);
    let need = NeedMatcher::from_config(config);

    let (quality_scores, (style_scores, need_scores)) = rayon::join(
        || run_pillar(&quality, snapshot),
        || {
            rayon::join(
                || run_pillar(&style, snapshot),
                || run_pillar(&need, snapshot),
            )
        },
    );
    let results = PillarResults {
        quality: quality_scores,
        style: style_scores,
        need: need_scores,
    };
    Aggregator::from_config(config).aggregate(snapshot, &results)
}
