//! Principal-component projection over standardised rows.
//!
//! Axes are the eigenvectors of the sample covariance matrix, found with the
//! cyclic Jacobi method. The matrices involved are at most the style feature
//! count on a side, so a dense symmetric solver is sufficient.

#![expect(
    clippy::float_arithmetic,
    reason = "covariance and eigenvector rotation are floating-point maths"
)]

const MAX_SWEEPS: usize = 100;
const OFF_DIAGONAL_TOLERANCE: f64 = 1e-22;

/// Orthonormal projection onto the leading principal axes.
#[derive(Debug, Clone, PartialEq)]
pub struct PrincipalComponents {
    axes: Vec<Vec<f64>>,
    explained_variance: Vec<f64>,
}

impl PrincipalComponents {
    /// Fit up to `count` axes on `rows`, which must already be centred.
    ///
    /// Returns `None` with fewer than two rows, ragged rows or a request for
    /// zero axes. Each axis is sign-normalised so its largest-magnitude
    /// loading is positive.
    #[must_use]
    pub fn fit(rows: &[Vec<f64>], count: usize) -> Option<Self> {
        let dimension = rows.first()?.len();
        if rows.len() < 2 || count == 0 || dimension == 0 {
            return None;
        }
        if rows.iter().any(|row| row.len() != dimension) {
            return None;
        }

        let covariance = covariance(rows, dimension);
        let (values, vectors) = jacobi_eigen(covariance);

        let mut order: Vec<usize> = (0..dimension).collect();
        order.sort_by(|&left, &right| {
            let value = |index: usize| values.get(index).copied().unwrap_or(f64::NEG_INFINITY);
            value(right).total_cmp(&value(left))
        });

        let kept = order.into_iter().take(count.min(dimension));
        let mut axes = Vec::new();
        let mut explained_variance = Vec::new();
        for index in kept {
            let axis: Vec<f64> = vectors
                .iter()
                .map(|row| row.get(index).copied().unwrap_or_default())
                .collect();
            axes.push(orient(axis));
            explained_variance.push(values.get(index).copied().unwrap_or_default());
        }
        Some(Self {
            axes,
            explained_variance,
        })
    }

    /// Project a centred row onto the fitted axes.
    #[must_use]
    pub fn project(&self, row: &[f64]) -> Vec<f64> {
        self.axes
            .iter()
            .map(|axis| axis.iter().zip(row).map(|(loading, value)| loading * value).sum())
            .collect()
    }

    /// Number of kept axes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.axes.len()
    }

    /// Report whether no axis was kept.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Variance captured by each kept axis, largest first.
    #[must_use]
    pub const fn explained_variance(&self) -> &[f64] {
        self.explained_variance.as_slice()
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "row counts stay far below the 2^52 exactness limit"
)]
fn covariance(rows: &[Vec<f64>], dimension: usize) -> Vec<Vec<f64>> {
    let denominator = (rows.len() - 1) as f64;
    (0..dimension)
        .map(|left| {
            (0..dimension)
                .map(|right| {
                    rows.iter()
                        .map(|row| {
                            let at = |index: usize| row.get(index).copied().unwrap_or_default();
                            at(left) * at(right)
                        })
                        .sum::<f64>()
                        / denominator
                })
                .collect()
        })
        .collect()
}

fn orient(axis: Vec<f64>) -> Vec<f64> {
    let dominant = axis
        .iter()
        .copied()
        .reduce(|best, value| if value.abs() > best.abs() { value } else { best })
        .unwrap_or_default();
    if dominant < 0.0 {
        axis.into_iter().map(|value| -value).collect()
    } else {
        axis
    }
}

/// Eigen-decompose a symmetric matrix.
///
/// Returns the eigenvalues and a matrix whose columns are the matching unit
/// eigenvectors.
#[expect(
    clippy::indexing_slicing,
    reason = "every index is bounded by the square matrix dimension"
)]
fn jacobi_eigen(mut matrix: Vec<Vec<f64>>) -> (Vec<f64>, Vec<Vec<f64>>) {
    let size = matrix.len();
    let mut vectors: Vec<Vec<f64>> = (0..size)
        .map(|row| (0..size).map(|col| if row == col { 1.0 } else { 0.0 }).collect())
        .collect();

    for _ in 0..MAX_SWEEPS {
        let off_diagonal: f64 = (0..size)
            .flat_map(|p| ((p + 1)..size).map(move |q| (p, q)))
            .map(|(p, q)| matrix[p][q].powi(2))
            .sum();
        if off_diagonal < OFF_DIAGONAL_TOLERANCE {
            break;
        }
        for p in 0..size {
            for q in (p + 1)..size {
                let pivot = matrix[p][q];
                if pivot.abs() < f64::MIN_POSITIVE {
                    continue;
                }
                let theta = (matrix[q][q] - matrix[p][p]) / (2.0 * pivot);
                let tangent = theta.signum() / (theta.abs() + theta.mul_add(theta, 1.0).sqrt());
                let cosine = 1.0 / tangent.mul_add(tangent, 1.0).sqrt();
                let sine = tangent * cosine;

                for row in &mut matrix {
                    let (left, right) = (row[p], row[q]);
                    row[p] = cosine * left - sine * right;
                    row[q] = sine * left + cosine * right;
                }
                for col in 0..size {
                    let (upper, lower) = (matrix[p][col], matrix[q][col]);
                    matrix[p][col] = cosine * upper - sine * lower;
                    matrix[q][col] = sine * upper + cosine * lower;
                }
                for row in &mut vectors {
                    let (left, right) = (row[p], row[q]);
                    row[p] = cosine * left - sine * right;
                    row[q] = sine * left + cosine * right;
                }
            }
        }
    }

    let values = (0..size).map(|index| matrix[index][index]).collect();
    (values, vectors)
}
