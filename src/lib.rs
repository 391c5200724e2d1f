//! Facade crate for the portalfit transfer-portal ranking engine.
//!
//! This crate re-exports the core domain types together with the scoring
//! configuration and the [`rank_candidates`] entry point.

#![forbid(unsafe_code)]

pub use portalfit_core::{
    CandidateRecord, CompositeRecord, EntityKey, ExternalRating, FitScore, NeedDetail, Pillar,
    PillarKind, PillarScore, PillarScores, PositionBucket, QualityDetail, RosterEntry, Snapshot,
    Stat, StyleDetail, TeamSeasonRecord,
};

pub use portalfit_scorer::{
    Aggregator, FitWeights, NeedMatcher, PillarError, QualityScorer, QualityWeights,
    ScoringConfig, StyleScorer, WeightsError, rank_candidates,
};
