//! Tunable configuration for the scoring pillars and the aggregator.

use serde::{Deserialize, Serialize};

use crate::WeightsError;

/// Weights blending the three quality sub-scores.
///
/// The defaults sum to 1.16 rather than 1.0. The quality pillar renormalises
/// by the cohort maximum afterwards, so the sum only shifts the raw scale;
/// it is kept as calibrated pending product sign-off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityWeights {
    /// Reputation sub-score weight.
    pub reputation: f64,
    /// Production sub-score weight.
    pub production: f64,
    /// Competition sub-score weight.
    pub competition: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            reputation: 0.50,
            production: 0.33,
            competition: 0.33,
        }
    }
}

impl QualityWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`WeightsError`] when a weight is not finite, is negative, or
    /// every weight is zero.
    pub fn validate(self) -> Result<Self, WeightsError> {
        check_weights("quality", [self.reputation, self.production, self.competition])?;
        Ok(self)
    }
}

/// Weights blending the three pillars into the fit score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitWeights {
    /// Quality pillar weight.
    pub quality: f64,
    /// Style pillar weight.
    pub style: f64,
    /// Need pillar weight.
    pub need: f64,
}

impl Default for FitWeights {
    fn default() -> Self {
        Self {
            quality: 0.34,
            style: 0.33,
            need: 0.33,
        }
    }
}

impl FitWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`WeightsError`] when a weight is not finite, is negative, or
    /// every weight is zero.
    pub fn validate(self) -> Result<Self, WeightsError> {
        check_weights("fit", [self.quality, self.style, self.need])?;
        Ok(self)
    }

    /// Blend three unit-interval pillar scores.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the fit blend is a weighted sum"
    )]
    pub fn blend(self, quality: f64, style: f64, need: f64) -> f64 {
        self.quality * quality + self.style * style + self.need * need
    }
}

fn check_weights(set: &'static str, weights: [f64; 3]) -> Result<(), WeightsError> {
    if weights.iter().any(|weight| !weight.is_finite()) {
        return Err(WeightsError::NonFinite { set });
    }
    if weights.iter().any(|weight| *weight < 0.0) {
        return Err(WeightsError::Negative { set });
    }
    if !weights.iter().any(|weight| *weight > 0.0) {
        return Err(WeightsError::ZeroTotal { set });
    }
    Ok(())
}

/// Every tunable the pillars and aggregator read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Quality sub-score weights.
    pub quality_weights: QualityWeights,
    /// Pillar weights for the fit score.
    pub fit_weights: FitWeights,
    /// Principal components kept in the style space.
    pub style_components: usize,
    /// Minimum style features a team-season needs for a style vector.
    pub min_style_coverage: usize,
    /// Stats or features reported in each explanation list.
    pub explain_count: usize,
    /// Minutes share, in percent, below which departures are ignored.
    pub min_departure_minutes: f64,
    /// Exponent applied to positional urgency.
    pub urgency_power: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            quality_weights: QualityWeights::default(),
            fit_weights: FitWeights::default(),
            style_components: 6,
            min_style_coverage: 16,
            explain_count: 3,
            min_departure_minutes: 10.0,
            urgency_power: 0.5,
        }
    }
}

impl ScoringConfig {
    /// Validate both weight sets and return a copy.
    ///
    /// # Errors
    /// Propagates [`WeightsError`] from either weight set.
    pub fn validate(self) -> Result<Self, WeightsError> {
        self.quality_weights.validate()?;
        self.fit_weights.validate()?;
        Ok(self)
    }
}
