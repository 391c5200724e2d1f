//! Numeric helpers shared by the pillars.
//!
//! Every helper works on plain `f64` slices of present values; callers drop
//! missing [`Stat`](portalfit_core::Stat)s before calling in.

#![expect(
    clippy::float_arithmetic,
    reason = "column statistics and similarity measures are floating-point maths"
)]
#![expect(
    clippy::cast_precision_loss,
    reason = "row counts stay far below the 2^52 exactness limit"
)]

use portalfit_core::{Pillar, PillarScores};

/// Arithmetic mean, or `None` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn squared_deviations(values: &[f64]) -> Option<f64> {
    let centre = mean(values)?;
    Some(values.iter().map(|value| (value - centre).powi(2)).sum())
}

/// Sample standard deviation (`n - 1` denominator), or `None` with fewer
/// than two values.
#[must_use]
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    squared_deviations(values).map(|total| (total / (values.len() - 1) as f64).sqrt())
}

/// Population standard deviation (`n` denominator), or `None` for an empty
/// slice.
#[must_use]
pub fn population_std(values: &[f64]) -> Option<f64> {
    squared_deviations(values).map(|total| (total / values.len() as f64).sqrt())
}

/// Standardise `row` against fitted per-column centres and scales.
///
/// Pair each scale with [`non_zero_scale`] so constant columns are only
/// centred.
///
/// # Examples
/// ```
/// use portalfit_scorer::stats::standardise;
///
/// assert_eq!(standardise(&[3.0, 2.0], &[2.0, 2.0], &[1.0, 1.0]), vec![1.0, 0.0]);
/// assert_eq!(standardise(&[6.0], &[2.0], &[2.0]), vec![2.0]);
/// ```
#[must_use]
pub fn standardise(row: &[f64], centres: &[f64], scales: &[f64]) -> Vec<f64> {
    row.iter()
        .zip(centres)
        .zip(scales)
        .map(|((value, centre), scale)| (value - centre) / scale)
        .collect()
}

/// Replace a zero or undefined deviation with one.
#[must_use]
pub fn non_zero_scale(deviation: Option<f64>) -> f64 {
    deviation
        .filter(|sigma| sigma.is_finite() && *sigma > 0.0)
        .unwrap_or(1.0)
}

/// Logistic squashing into `(0, 1)`.
#[must_use]
pub fn logistic(value: f64) -> f64 {
    1.0 / (1.0 + (-value).exp())
}

/// Cosine similarity, or `None` when either vector has zero length or the
/// dimensions differ.
#[must_use]
pub fn cosine(left: &[f64], right: &[f64]) -> Option<f64> {
    if left.len() != right.len() {
        return None;
    }
    let dot: f64 = left.iter().zip(right).map(|(a, b)| a * b).sum();
    let norm = |vector: &[f64]| vector.iter().map(|value| value * value).sum::<f64>().sqrt();
    let denominator = norm(left) * norm(right);
    (denominator > 0.0).then(|| (dot / denominator).clamp(-1.0, 1.0))
}

/// Map a cosine in `-1.0..=1.0` onto `0.0..=1.0`.
///
/// # Examples
/// ```
/// use portalfit_scorer::stats::unit_similarity;
///
/// assert_eq!(unit_similarity(-1.0), 0.0);
/// assert_eq!(unit_similarity(0.0), 0.5);
/// assert_eq!(unit_similarity(1.0), 1.0);
/// ```
#[must_use]
pub fn unit_similarity(cosine: f64) -> f64 {
    (cosine + 1.0) / 2.0
}

/// Divide every score by the cohort maximum, then sanitise.
///
/// A zero (or empty) maximum leaves the raw scores unscaled.
pub fn normalise_by_max<P: Pillar>(scores: &mut PillarScores<P::Detail>) {
    let max = scores.max_score().filter(|max| *max > 0.0).unwrap_or(1.0);
    scores.map_scores(|raw| P::sanitise(raw / max));
}

/// Split `(label, deviation)` pairs into the `count` smallest deviations,
/// smallest first, and the `count` largest, largest first.
///
/// Equal deviations keep their input order.
#[must_use]
pub fn extremes<T: Copy>(deviations: &[(T, f64)], count: usize) -> (Vec<T>, Vec<T>) {
    let mut ascending = deviations.to_vec();
    ascending.sort_by(|left, right| left.1.total_cmp(&right.1));
    let mut descending = deviations.to_vec();
    descending.sort_by(|left, right| right.1.total_cmp(&left.1));
    let labels = |pairs: Vec<(T, f64)>| -> Vec<T> {
        pairs.into_iter().take(count).map(|(label, _)| label).collect()
    };
    (labels(ascending), labels(descending))
}
