//! Origin-team stylistic fit.
//!
//! A [`StyleModel`] is fitted on every team-season in the snapshot: missing
//! features are imputed with column means, columns are standardised and the
//! table is projected onto its leading principal axes. The target program's
//! reference is the mean of its projected seasons, and candidates are scored
//! by the cosine between their origin team-season and that reference.

use log::debug;
use portalfit_core::{
    CandidateRecord, EntityKey, Pillar, PillarKind, PillarScore, PillarScores,
    STYLE_FEATURE_COUNT, STYLE_FEATURES, Snapshot, StyleDetail, TeamSeasonRecord,
};

use crate::pca::PrincipalComponents;
use crate::stats::{
    cosine, extremes, mean, non_zero_scale, normalise_by_max, population_std, standardise,
    unit_similarity,
};
use crate::{PillarError, ScoringConfig};

/// Standardising scaler and principal-component projection for style rows.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleModel {
    means: Vec<f64>,
    scales: Vec<f64>,
    components: PrincipalComponents,
}

impl StyleModel {
    /// Fit the model on every row of `history`.
    ///
    /// # Errors
    /// Returns [`PillarError::EmptyStyleHistory`] for an empty table and
    /// [`PillarError::DegenerateStyleSpace`] when no projection can be fitted.
    pub fn fit(history: &[TeamSeasonRecord], components: usize) -> Result<Self, PillarError> {
        if history.is_empty() {
            return Err(PillarError::EmptyStyleHistory);
        }
        let degenerate = || PillarError::DegenerateStyleSpace {
            rows: history.len(),
            features: STYLE_FEATURE_COUNT,
        };

        let means: Vec<f64> = (0..STYLE_FEATURE_COUNT)
            .map(|column| {
                let present: Vec<f64> = history
                    .iter()
                    .filter_map(|record| record.features.get(column).and_then(|stat| stat.value()))
                    .collect();
                mean(&present).unwrap_or_default()
            })
            .collect();
        let imputed: Vec<Vec<f64>> = history
            .iter()
            .map(|record| impute(record, &means))
            .collect();
        let scales: Vec<f64> = (0..STYLE_FEATURE_COUNT)
            .map(|column| {
                let values: Vec<f64> = imputed
                    .iter()
                    .filter_map(|row| row.get(column).copied())
                    .collect();
                non_zero_scale(population_std(&values))
            })
            .collect();

        let standardised: Vec<Vec<f64>> = imputed
            .iter()
            .map(|row| standardise(row, &means, &scales))
            .collect();
        let projection = PrincipalComponents::fit(&standardised, components)
            .filter(|fitted| !fitted.is_empty())
            .ok_or_else(degenerate)?;
        let model = Self {
            means,
            scales,
            components: projection,
        };
        debug!(
            "fitted style space: {} rows, {} components capturing variance {:.3}",
            history.len(),
            model.components.len(),
            model.components.explained_variance().iter().sum::<f64>()
        );
        Ok(model)
    }

    /// Project a team-season, or `None` when fewer than `min_coverage`
    /// features are present.
    #[must_use]
    pub fn vector(&self, record: &TeamSeasonRecord, min_coverage: usize) -> Option<Vec<f64>> {
        if record.coverage() < min_coverage {
            return None;
        }
        Some(self.components.project(&self.standardised(record)))
    }

    /// Impute and standardise a team-season with the fitted moments, before
    /// projection.
    #[must_use]
    pub fn standardised(&self, record: &TeamSeasonRecord) -> Vec<f64> {
        standardise(&impute(record, &self.means), &self.means, &self.scales)
    }

    /// The fitted projection.
    #[must_use]
    pub const fn components(&self) -> &PrincipalComponents {
        &self.components
    }
}

fn impute(record: &TeamSeasonRecord, means: &[f64]) -> Vec<f64> {
    record
        .features
        .iter()
        .zip(means)
        .map(|(stat, fallback)| stat.value().unwrap_or(*fallback))
        .collect()
}

/// The target program's style anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleReference {
    /// Mean projected vector across the program's seasons.
    pub vector: Vec<f64>,
    /// Mean raw feature values across the program's seasons.
    pub raw_means: [Option<f64>; STYLE_FEATURE_COUNT],
}

impl StyleReference {
    /// Build the reference for `program` from every season in `history`.
    ///
    /// # Errors
    /// Returns [`PillarError::MissingReference`] when no program season has
    /// enough coverage for a vector.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "the reference averages projected vectors"
    )]
    pub fn build(
        model: &StyleModel,
        history: &[TeamSeasonRecord],
        program: &EntityKey,
        min_coverage: usize,
    ) -> Result<Self, PillarError> {
        let seasons: Vec<&TeamSeasonRecord> =
            history.iter().filter(|record| record.key == *program).collect();
        let vectors: Vec<Vec<f64>> = seasons
            .iter()
            .filter_map(|record| model.vector(record, min_coverage))
            .collect();
        let Some(first) = vectors.first() else {
            return Err(PillarError::MissingReference {
                program: program.as_str().to_owned(),
            });
        };

        let mut vector = vec![0.0; first.len()];
        for projected in &vectors {
            for (total, value) in vector.iter_mut().zip(projected) {
                *total += value;
            }
        }
        let count = vectors.len() as f64;
        for total in &mut vector {
            *total /= count;
        }

        let raw_means = std::array::from_fn(|column| {
            let present: Vec<f64> = seasons
                .iter()
                .filter_map(|record| record.features.get(column).and_then(|stat| stat.value()))
                .collect();
            mean(&present)
        });
        Ok(Self { vector, raw_means })
    }

    /// Features closest to and furthest from the program's raw profile.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "deviations subtract the program mean"
    )]
    pub fn explain(&self, origin: &TeamSeasonRecord, count: usize) -> StyleDetail {
        let deviations: Vec<(&'static str, f64)> = STYLE_FEATURES
            .iter()
            .zip(origin.features)
            .zip(self.raw_means)
            .filter_map(|((name, stat), centre)| Some((*name, (stat.value()? - centre?).abs())))
            .collect();
        let (similar, dissimilar) = extremes(&deviations, count);
        StyleDetail {
            similar,
            dissimilar,
        }
    }
}

/// Scores candidates by their origin team's resemblance to the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleScorer {
    components: usize,
    min_coverage: usize,
    explain_count: usize,
}

impl StyleScorer {
    /// Construct a scorer.
    #[must_use]
    pub const fn new(components: usize, min_coverage: usize, explain_count: usize) -> Self {
        Self {
            components,
            min_coverage,
            explain_count,
        }
    }

    /// Construct a scorer from the shared configuration.
    #[must_use]
    pub const fn from_config(config: &ScoringConfig) -> Self {
        Self::new(
            config.style_components,
            config.min_style_coverage,
            config.explain_count,
        )
    }

    fn score_candidate(
        &self,
        snapshot: &Snapshot,
        model: &StyleModel,
        reference: &StyleReference,
        candidate: &CandidateRecord,
    ) -> PillarScore<StyleDetail> {
        let origin = snapshot.team_season(&candidate.team_key, snapshot.season);
        let similarity = origin.and_then(|record| {
            let projected = model.vector(record, self.min_coverage)?;
            cosine(&projected, &reference.vector).map(|value| (record, unit_similarity(value)))
        });
        match similarity {
            Some((record, score)) => PillarScore::new(
                candidate.key.clone(),
                score,
                reference.explain(record, self.explain_count),
            ),
            None => {
                debug!(
                    "no style vector for {} ({} {})",
                    candidate.player, candidate.team, snapshot.season
                );
                PillarScore::new(candidate.key.clone(), 0.0, StyleDetail::default())
            }
        }
    }
}

impl Default for StyleScorer {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

impl Pillar for StyleScorer {
    type Detail = StyleDetail;
    type Error = PillarError;
    const KIND: PillarKind = PillarKind::Style;

    fn score(&self, snapshot: &Snapshot) -> Result<PillarScores<StyleDetail>, PillarError> {
        debug!(
            "scoring style for {} candidates over {} team-seasons",
            snapshot.candidates.len(),
            snapshot.team_seasons.len()
        );
        let model = StyleModel::fit(&snapshot.team_seasons, self.components)?;
        let reference = StyleReference::build(
            &model,
            &snapshot.team_seasons,
            &snapshot.program_key,
            self.min_coverage,
        )?;

        let mut scores: PillarScores<StyleDetail> = snapshot
            .candidates
            .iter()
            .filter(|candidate| !snapshot.is_program_team(&candidate.team_key))
            .map(|candidate| self.score_candidate(snapshot, &model, &reference, candidate))
            .collect();
        normalise_by_max::<Self>(&mut scores);
        Ok(scores)
    }
}
