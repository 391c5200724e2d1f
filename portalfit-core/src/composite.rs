//! Final ranked records and the integer fit score.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::{
    CandidateRecord, EntityKey, ExternalRating, NeedDetail, PillarScore, QualityDetail,
    StyleDetail,
};

/// Keys the composite output writes itself. Source rows are stripped of
/// these before being copied.
pub const RESERVED_OUTPUT_KEYS: [&str; 12] = [
    "qualityScore",
    "strengths",
    "weaknesses",
    "styleScore",
    "similarStats",
    "dissimilarStats",
    "needScore",
    "matchedTo",
    "fitScore",
    "positionBucket",
    "ppg",
    "reputation",
];

/// Integer composite fit score in `0..=99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct FitScore(u8);

impl FitScore {
    /// Highest attainable score.
    pub const MAX: Self = Self(99);

    /// Scale a unit-interval blend onto `0..=99`.
    ///
    /// Halves round to even. Out-of-range input is clamped and non-finite
    /// input scores zero.
    ///
    /// # Examples
    /// ```
    /// use portalfit_core::FitScore;
    ///
    /// assert_eq!(FitScore::from_unit(0.5).value(), 50);
    /// assert_eq!(FitScore::from_unit(1.2).value(), 99);
    /// assert_eq!(FitScore::from_unit(f64::NAN).value(), 0);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the blend is scaled onto the integer range"
    )]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the scaled value is rounded and clamped into 0..=99 first"
    )]
    pub fn from_unit(raw: f64) -> Self {
        if !raw.is_finite() {
            return Self(0);
        }
        let scaled = (raw * 99.0).round_ties_even().clamp(0.0, 99.0);
        Self(scaled as u8)
    }

    /// The score as an integer.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for FitScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One candidate's joined pillar results and fit score.
///
/// Serialises as the candidate's source row followed by the score fields. A
/// missing pillar omits its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeRecord {
    /// The scored candidate.
    pub candidate: CandidateRecord,
    /// Quality pillar result.
    pub quality: Option<PillarScore<QualityDetail>>,
    /// Style pillar result.
    pub style: Option<PillarScore<StyleDetail>>,
    /// Need pillar result.
    pub need: Option<PillarScore<NeedDetail>>,
    /// Matched external rating.
    pub reputation: Option<ExternalRating>,
    /// Composite fit score.
    pub fit_score: FitScore,
}

impl CompositeRecord {
    /// Candidate join key.
    #[must_use]
    pub const fn key(&self) -> &EntityKey {
        &self.candidate.key
    }

    /// Quality score, zero when the pillar is absent.
    #[must_use]
    pub fn quality_score(&self) -> f64 {
        self.quality.as_ref().map_or(0.0, |score| score.score)
    }

    /// Style score, zero when the pillar is absent.
    #[must_use]
    pub fn style_score(&self) -> f64 {
        self.style.as_ref().map_or(0.0, |score| score.score)
    }

    /// Need score, zero when the pillar is absent.
    #[must_use]
    pub fn need_score(&self) -> f64 {
        self.need.as_ref().map_or(0.0, |score| score.score)
    }

    /// Points per game rounded to one decimal.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "rounding to one decimal scales by ten"
    )]
    pub fn rounded_ppg(&self) -> Option<f64> {
        self.candidate
            .points_per_game()
            .map(|ppg| (ppg * 10.0).round() / 10.0)
    }
}

impl Serialize for CompositeRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        for (field, value) in self.candidate.source() {
            if !RESERVED_OUTPUT_KEYS.contains(&field.as_str()) {
                map.serialize_entry(field, value)?;
            }
        }
        if let Some(quality) = &self.quality {
            map.serialize_entry("qualityScore", &quality.score)?;
            map.serialize_entry("strengths", &quality.detail.strengths)?;
            map.serialize_entry("weaknesses", &quality.detail.weaknesses)?;
        }
        if let Some(style) = &self.style {
            map.serialize_entry("styleScore", &style.score)?;
            map.serialize_entry("similarStats", &style.detail.similar)?;
            map.serialize_entry("dissimilarStats", &style.detail.dissimilar)?;
        }
        if let Some(need) = &self.need {
            map.serialize_entry("needScore", &need.score)?;
            if let Some(matched) = &need.detail.matched_to {
                map.serialize_entry("matchedTo", matched)?;
            }
        }
        map.serialize_entry("fitScore", &self.fit_score)?;
        map.serialize_entry("positionBucket", &self.candidate.position)?;
        if let Some(ppg) = self.rounded_ppg() {
            map.serialize_entry("ppg", &ppg)?;
        }
        if let Some(reputation) = &self.reputation {
            map.serialize_entry("reputation", reputation)?;
        }
        map.end()
    }
}
