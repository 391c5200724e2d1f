//! Coarse positional buckets derived from free-text role labels.
//!
//! Role strings such as `"Scoring PG"`, `"Wing F"` or `"Stretch 4"` are
//! classified by walking [`ROLE_PATTERNS`] in order and returning the bucket
//! of the first pattern that matches the lowercased role. Anything unmatched
//! is [`PositionBucket::Unknown`].

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Positional bucket used to group candidates and roster players.
///
/// The declaration order is the fixed total order over buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PositionBucket {
    /// Point guard.
    PointGuard,
    /// Shooting or combo guard.
    ShootingGuard,
    /// Wing or small forward.
    Wing,
    /// Power forward or stretch four.
    PowerForward,
    /// Center.
    Center,
    /// No pattern matched the role label.
    Unknown,
}

impl PositionBucket {
    /// Every bucket in order.
    pub const ALL: [Self; 6] = [
        Self::PointGuard,
        Self::ShootingGuard,
        Self::Wing,
        Self::PowerForward,
        Self::Center,
        Self::Unknown,
    ];

    /// Classify a role label.
    ///
    /// # Examples
    /// ```
    /// use portalfit_core::PositionBucket;
    ///
    /// assert_eq!(PositionBucket::classify("Scoring PG"), PositionBucket::PointGuard);
    /// assert_eq!(PositionBucket::classify("PF/C"), PositionBucket::PowerForward);
    /// assert_eq!(PositionBucket::classify("Stretch 4"), PositionBucket::PowerForward);
    /// assert_eq!(PositionBucket::classify(""), PositionBucket::Unknown);
    /// ```
    #[must_use]
    pub fn classify(role: &str) -> Self {
        let lowered = role.trim().to_lowercase();
        ROLE_PATTERNS
            .iter()
            .find(|(pattern, _)| pattern.matches(&lowered))
            .map_or(Self::Unknown, |(_, bucket)| *bucket)
    }

    /// Short label used in output records.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PointGuard => "PG",
            Self::ShootingGuard => "SG",
            Self::Wing => "Wing",
            Self::PowerForward => "PF",
            Self::Center => "C",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PositionBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for PositionBucket {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

/// Error returned when a bucket label is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown position bucket label {0:?}")]
pub struct ParseBucketError(String);

impl FromStr for PositionBucket {
    type Err = ParseBucketError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.label().eq_ignore_ascii_case(label.trim()))
            .ok_or_else(|| ParseBucketError(label.to_owned()))
    }
}

/// A single textual test applied to a lowercased role label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolePattern {
    /// The role contains the fragment anywhere.
    Contains(&'static str),
    /// The role ends with the fragment.
    EndsWith(&'static str),
}

impl RolePattern {
    /// Test the pattern against an already lowercased role.
    #[must_use]
    pub fn matches(self, role: &str) -> bool {
        match self {
            Self::Contains(fragment) => role.contains(fragment),
            Self::EndsWith(fragment) => role.ends_with(fragment),
        }
    }
}

/// Ordered classification table. The first matching entry wins.
pub const ROLE_PATTERNS: &[(RolePattern, PositionBucket)] = &[
    (RolePattern::Contains("pg"), PositionBucket::PointGuard),
    (RolePattern::Contains("point"), PositionBucket::PointGuard),
    (RolePattern::Contains("sg"), PositionBucket::ShootingGuard),
    (RolePattern::Contains("shoot"), PositionBucket::ShootingGuard),
    (RolePattern::Contains("combo g"), PositionBucket::ShootingGuard),
    (RolePattern::Contains("combog"), PositionBucket::ShootingGuard),
    (RolePattern::Contains("wing"), PositionBucket::Wing),
    (RolePattern::Contains("sf"), PositionBucket::Wing),
    (RolePattern::Contains("g/f"), PositionBucket::Wing),
    (RolePattern::Contains("pf"), PositionBucket::PowerForward),
    (RolePattern::Contains("stretch 4"), PositionBucket::PowerForward),
    (RolePattern::Contains("stretch4"), PositionBucket::PowerForward),
    (RolePattern::EndsWith("4"), PositionBucket::PowerForward),
    (RolePattern::EndsWith("c"), PositionBucket::Center),
    (RolePattern::Contains("center"), PositionBucket::Center),
];
