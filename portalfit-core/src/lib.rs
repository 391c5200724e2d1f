//! Core domain types for the portalfit transfer-portal ranking engine.
//!
//! The records here model one recruiting cycle: portal candidates, the
//! target program's roster, league-wide team-season style profiles and
//! external reputation ratings. Every numeric column is a [`Stat`], an
//! explicit optional value, so missing or malformed data never turns into a
//! sentinel float. Pillars implement [`Pillar`] over a borrowed
//! [`Snapshot`]; their results are joined into [`CompositeRecord`]s.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod candidate;
mod composite;
mod key;
mod pillar;
mod position;
mod reputation;
mod roster;
mod snapshot;
mod stat;
mod team;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(all(docsrs, not(test)), doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use candidate::{CandidateRecord, PlayerStats, ShootingSplits, StatColumn};
pub use composite::{CompositeRecord, FitScore, RESERVED_OUTPUT_KEYS};
pub use key::EntityKey;
pub use pillar::{
    NeedDetail, Pillar, PillarKind, PillarScore, PillarScores, QualityDetail, StyleDetail,
};
pub use position::{PositionBucket, ROLE_PATTERNS, ParseBucketError, RolePattern};
pub use reputation::ExternalRating;
pub use roster::RosterEntry;
pub use snapshot::Snapshot;
pub use stat::{ShootingSplit, Stat, parse_height_inches};
pub use team::{STRENGTH_FIELD, STYLE_FEATURE_COUNT, STYLE_FEATURES, TeamSeasonRecord};
