//! Property-based tests for the scoring helpers and the ranking pipeline.
//!
//! # Invariants tested
//!
//! - **Standardisation:** every fully present style column has mean 0 and
//!   population deviation 1 once the fitted model standardises it.
//! - **Cosine rescaling:** `(cos + 1) / 2` stays in the unit interval and is
//!   monotonic.
//! - **Fit score range:** any finite blend maps into `0..=99`.
//! - **Determinism:** identical snapshots rank identically.

#![expect(
    clippy::float_arithmetic,
    reason = "properties compare floating-point statistics"
)]

use portalfit_core::test_support::synthetic_snapshot;
use portalfit_core::{FitScore, STYLE_FEATURE_COUNT, Stat, TeamSeasonRecord};
use portalfit_scorer::stats::{mean, population_std, unit_similarity};
use portalfit_scorer::{FitWeights, ScoringConfig, StyleModel, rank_candidates};
use proptest::prelude::*;

fn team_seasons(rows: &[Vec<f64>]) -> Vec<TeamSeasonRecord> {
    (0_u16..)
        .zip(rows)
        .map(|(index, row)| {
            let features: [Stat; STYLE_FEATURE_COUNT] = std::array::from_fn(|column| {
                row.get(column).copied().map_or(Stat::MISSING, Stat::new)
            });
            TeamSeasonRecord::new(&format!("Team {index}"), 2025, features)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: every fitted style column with spread has zero mean and unit
    /// population deviation once standardised.
    #[test]
    fn style_columns_standardise_to_unit_moments(
        rows in prop::collection::vec(
            prop::collection::vec(-1_000.0_f64..1_000.0, STYLE_FEATURE_COUNT),
            8..24,
        ),
    ) {
        let history = team_seasons(&rows);
        let fitted = StyleModel::fit(&history, 6);
        prop_assume!(fitted.is_ok());
        let Ok(model) = fitted else { return Ok(()); };

        let standardised: Vec<Vec<f64>> =
            history.iter().map(|record| model.standardised(record)).collect();

        for column in 0..STYLE_FEATURE_COUNT {
            let raw: Vec<f64> = rows.iter().filter_map(|row| row.get(column).copied()).collect();
            if population_std(&raw).unwrap_or_default() <= 0.1 {
                continue;
            }
            let values: Vec<f64> = standardised
                .iter()
                .filter_map(|row| row.get(column).copied())
                .collect();
            let centre = mean(&values).unwrap_or(f64::NAN);
            let deviation = population_std(&values).unwrap_or(f64::NAN);
            prop_assert!(centre.abs() < 1e-8, "column {column} mean was {centre}");
            prop_assert!(
                (deviation - 1.0).abs() < 1e-8,
                "column {column} deviation was {deviation}"
            );
        }
    }

    /// Property: the cosine rescaling is bounded and order-preserving.
    #[test]
    fn unit_similarity_is_monotonic(a in -1.0_f64..=1.0, b in -1.0_f64..=1.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!((0.0..=1.0).contains(&unit_similarity(low)));
        prop_assert!((0.0..=1.0).contains(&unit_similarity(high)));
        prop_assert!(unit_similarity(low) <= unit_similarity(high));
    }

    /// Property: every finite pillar blend yields an integer in `0..=99`.
    #[test]
    fn fit_score_stays_in_range(
        quality in -2.0_f64..2.0,
        style in -2.0_f64..2.0,
        need in -2.0_f64..2.0,
    ) {
        let score = FitScore::from_unit(FitWeights::default().blend(quality, style, need));
        prop_assert!(score <= FitScore::MAX);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    /// Property: ranking the same snapshot twice yields identical output.
    #[test]
    fn ranking_is_idempotent(candidates in 1_usize..40) {
        let snapshot = synthetic_snapshot(candidates);
        let config = ScoringConfig::default();

        let first = rank_candidates(&snapshot, &config);
        let second = rank_candidates(&snapshot, &config);

        prop_assert_eq!(first.len(), candidates);
        prop_assert_eq!(first, second);
    }
}

#[test]
fn unit_similarity_fixed_points() {
    assert_eq!(unit_similarity(-1.0), 0.0);
    assert_eq!(unit_similarity(0.0), 0.5);
    assert_eq!(unit_similarity(1.0), 1.0);
}
