//! Standardization + principal-component projection.
//!
//! The pipeline mirrors the usual `StandardScaler` → `PCA(2)` chain:
//!
//! 1. z-score each feature with the sample standard deviation
//!    (constant features become all-zero columns);
//! 2. eigen-decompose the 4×4 covariance of the z-scores;
//! 3. keep the two leading eigenvectors and project onto them.
//!
//! Generic eigen-solvers return components in arbitrary order and sign, so
//! both are pinned here:
//!
//! * components are ordered by eigenvalue, descending; exact ties go to the
//!   component whose dominant loading has the lower feature index;
//! * each component is flipped so that its dominant (largest-magnitude)
//!   loading is positive. Among equal magnitudes the lowest feature index is
//!   dominant.

use nalgebra::{Matrix4, SymmetricEigen};
use serde::Serialize;

use super::{column, is_constant, mean, sample_std};
use crate::data::{FEATURE_COUNT, Feature, Sample};
use crate::error::{AnalysisError, Result};

/// Number of retained principal components.
pub const COMPONENTS: usize = 2;

/// Output of [`project`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    /// `(PC1, PC2)` per input sample, in input order.
    pub coords: Vec<[f64; COMPONENTS]>,
    /// Eigenvalue share of each retained component.
    pub explained_variance: [f64; COMPONENTS],
    /// `loadings[feature][component]`, unit-norm columns.
    pub loadings: [[f64; COMPONENTS]; FEATURE_COUNT],
    /// Full spectrum of the standardized covariance, descending.
    pub eigenvalues: [f64; FEATURE_COUNT],
}

impl ProjectionResult {
    pub fn loading(&self, feature: Feature, component: usize) -> f64 {
        self.loadings[feature.index()][component]
    }

    /// Combined share of the retained components.
    pub fn total_explained(&self) -> f64 {
        self.explained_variance.iter().sum()
    }

    /// Explained share of `component` as a percentage.
    pub fn percent(&self, component: usize) -> f64 {
        self.explained_variance[component] * 100.0
    }
}

/// Z-score every feature column of `subset`.
///
/// Uses the sample (n-1) standard deviation. A feature that is constant
/// within `subset`, or a subset of fewer than two samples, yields 0 for
/// every row of that feature.
pub fn standardize(subset: &[Sample]) -> Vec<[f64; FEATURE_COUNT]> {
    let mut scales = [(0.0, None); FEATURE_COUNT];
    for (j, scale) in scales.iter_mut().enumerate() {
        let values = column(subset, j);
        if values.is_empty() || is_constant(&values) {
            continue;
        }
        *scale = (mean(&values), sample_std(&values));
    }

    subset
        .iter()
        .map(|s| {
            let mut z = [0.0; FEATURE_COUNT];
            for (j, &(m, sd)) in scales.iter().enumerate() {
                if let Some(sd) = sd {
                    z[j] = (s.features[j] - m) / sd;
                }
            }
            z
        })
        .collect()
}

/// Project `subset` onto its first two principal components.
///
/// Fails with [`AnalysisError::InsufficientData`] below two samples.
pub fn project(subset: &[Sample]) -> Result<ProjectionResult> {
    if subset.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            required: 2,
            actual: subset.len(),
        });
    }

    let z = standardize(subset);
    let denom = (z.len() - 1) as f64;

    let mut cov = Matrix4::<f64>::zeros();
    for i in 0..FEATURE_COUNT {
        for j in i..FEATURE_COUNT {
            let c = z.iter().map(|row| row[i] * row[j]).sum::<f64>() / denom;
            cov[(i, j)] = c;
            cov[(j, i)] = c;
        }
    }

    let eigen = SymmetricEigen::new(cov);

    let mut components: Vec<(f64, [f64; FEATURE_COUNT])> = (0..FEATURE_COUNT)
        .map(|k| {
            let mut v = [0.0; FEATURE_COUNT];
            for (j, slot) in v.iter_mut().enumerate() {
                *slot = eigen.eigenvectors[(j, k)];
            }
            orient(&mut v);
            // Rounding can leave tiny negative eigenvalues on a PSD matrix.
            let lambda = eigen.eigenvalues[k];
            (if lambda > 0.0 { lambda } else { 0.0 }, v)
        })
        .collect();

    components.sort_by(|a, b| {
        b.0.total_cmp(&a.0)
            .then_with(|| dominant_index(&a.1).cmp(&dominant_index(&b.1)))
    });

    let mut eigenvalues = [0.0; FEATURE_COUNT];
    for (slot, (lambda, _)) in eigenvalues.iter_mut().zip(&components) {
        *slot = *lambda;
    }
    let total: f64 = eigenvalues.iter().sum();

    let mut explained_variance = [0.0; COMPONENTS];
    let mut loadings = [[0.0; COMPONENTS]; FEATURE_COUNT];
    for (c, (lambda, v)) in components.iter().take(COMPONENTS).enumerate() {
        explained_variance[c] = if total > 0.0 { lambda / total } else { 0.0 };
        for j in 0..FEATURE_COUNT {
            loadings[j][c] = v[j];
        }
    }

    let coords = z
        .iter()
        .map(|row| {
            let mut p = [0.0; COMPONENTS];
            for (c, slot) in p.iter_mut().enumerate() {
                *slot = (0..FEATURE_COUNT).map(|j| row[j] * loadings[j][c]).sum();
            }
            p
        })
        .collect();

    log::debug!(
        "PCA over {} samples: explained variance {:.4} / {:.4}",
        subset.len(),
        explained_variance[0],
        explained_variance[1]
    );

    Ok(ProjectionResult {
        coords,
        explained_variance,
        loadings,
        eigenvalues,
    })
}

/// Index of the largest-magnitude entry; the first one wins ties.
fn dominant_index(v: &[f64; FEATURE_COUNT]) -> usize {
    let mut best = 0;
    for j in 1..FEATURE_COUNT {
        if v[j].abs() > v[best].abs() {
            best = j;
        }
    }
    best
}

fn orient(v: &mut [f64; FEATURE_COUNT]) {
    if v[dominant_index(v)] < 0.0 {
        for x in v.iter_mut() {
            *x = -*x;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Selection, filter, full_selection};
    use crate::data::{Species, load};

    fn subset_of(species: &[Species]) -> Vec<Sample> {
        let ds = load().expect("dataset");
        let sel: Selection = species.iter().copied().collect();
        filter(&ds, &sel).expect("filter")
    }

    fn full() -> Vec<Sample> {
        let ds = load().expect("dataset");
        filter(&ds, &full_selection()).expect("filter")
    }

    #[test]
    fn test_full_dataset_explained_variance() {
        let pca = project(&full()).expect("150 samples");
        let [pc1, pc2] = pca.explained_variance;
        assert!((pc1 - 0.7296).abs() < 1e-3, "PC1 = {pc1}");
        assert!((pc2 - 0.2285).abs() < 1e-3, "PC2 = {pc2}");
        assert!(pca.total_explained() > 0.90);
        assert!(pca.total_explained() < 1.0);
    }

    #[test]
    fn test_full_dataset_loadings_and_signs() {
        let pca = project(&full()).expect("150 samples");
        let pc1 = [0.5211, -0.2693, 0.5804, 0.5649];
        let pc2 = [0.3774, 0.9233, 0.0245, 0.0669];
        for j in 0..FEATURE_COUNT {
            assert!((pca.loadings[j][0] - pc1[j]).abs() < 1e-3, "PC1[{j}] = {}", pca.loadings[j][0]);
            assert!((pca.loadings[j][1] - pc2[j]).abs() < 1e-3, "PC2[{j}] = {}", pca.loadings[j][1]);
        }
        assert!(pca.loading(Feature::PetalLength, 0) > 0.0);
        assert!(pca.loading(Feature::SepalWidth, 1) > 0.0);
    }

    #[test]
    fn test_eigenvalues_sum_to_feature_count() {
        let pca = project(&full()).expect("150 samples");
        let total: f64 = pca.eigenvalues.iter().sum();
        assert!((total - 4.0).abs() < 1e-9);
        assert!(pca.eigenvalues.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_setosa_projection() {
        let subset = subset_of(&[Species::Setosa]);
        let pca = project(&subset).expect("50 samples");
        assert_eq!(pca.coords.len(), 50);
        let [pc1, pc2] = pca.explained_variance;
        assert!(pc1 >= pc2 && pc2 >= 0.0);
        assert!(pc1 + pc2 <= 1.0);
    }

    #[test]
    fn test_loadings_orthonormal() {
        let selections: [&[Species]; 3] = [
            &[Species::Setosa],
            &[Species::Versicolor, Species::Virginica],
            &Species::ALL,
        ];
        for species in selections {
            let pca = project(&subset_of(species)).expect("projection");
            let dot = |a: usize, b: usize| -> f64 {
                (0..FEATURE_COUNT).map(|j| pca.loadings[j][a] * pca.loadings[j][b]).sum()
            };
            assert!((dot(0, 0) - 1.0).abs() < 1e-9);
            assert!((dot(1, 1) - 1.0).abs() < 1e-9);
            assert!(dot(0, 1).abs() < 1e-9);
            for row in &pca.loadings {
                assert!(row.iter().all(|l| (-1.0..=1.0).contains(l)));
            }
        }
    }

    #[test]
    fn test_coordinate_variance_matches_eigenvalues() {
        let pca = project(&full()).expect("150 samples");
        for c in 0..COMPONENTS {
            let vals: Vec<f64> = pca.coords.iter().map(|p| p[c]).collect();
            assert!(mean(&vals).abs() < 1e-9);
            let var = sample_std(&vals).unwrap().powi(2);
            assert!((var - pca.eigenvalues[c]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_projection_is_deterministic() {
        let subset = subset_of(&[Species::Versicolor, Species::Virginica]);
        let a = project(&subset).expect("first run");
        let b = project(&subset).expect("second run");
        assert_eq!(a, b);
        for (pa, pb) in a.coords.iter().zip(&b.coords) {
            assert_eq!(pa[0].to_bits(), pb[0].to_bits());
            assert_eq!(pa[1].to_bits(), pb[1].to_bits());
        }
    }

    #[test]
    fn test_insufficient_data() {
        let subset = subset_of(&[Species::Setosa]);
        assert_eq!(
            project(&subset[..1]),
            Err(AnalysisError::InsufficientData { required: 2, actual: 1 })
        );
        assert_eq!(
            project(&[]),
            Err(AnalysisError::InsufficientData { required: 2, actual: 0 })
        );
    }

    #[test]
    fn test_constant_feature_standardizes_to_zero() {
        let rows = vec![
            Sample { features: [5.0, 3.0, 1.4, 0.2], species: Species::Setosa },
            Sample { features: [5.5, 3.4, 1.5, 0.2], species: Species::Setosa },
            Sample { features: [4.8, 3.1, 1.3, 0.2], species: Species::Setosa },
            Sample { features: [5.2, 3.9, 1.6, 0.2], species: Species::Setosa },
        ];
        let z = standardize(&rows);
        assert!(z.iter().all(|r| r[3] == 0.0));

        let pca = project(&rows).expect("4 samples");
        assert!(pca.coords.iter().flatten().all(|v| v.is_finite()));
        assert!(pca.explained_variance.iter().all(|v| v.is_finite()));
        // Three informative features carry the whole spectrum.
        let total: f64 = pca.eigenvalues.iter().sum();
        assert!((total - 3.0).abs() < 1e-9);
        assert!(pca.eigenvalues[3].abs() < 1e-12);
    }

    #[test]
    fn test_all_constant_features() {
        let row = Sample { features: [5.0, 3.0, 1.4, 0.2], species: Species::Setosa };
        let pca = project(&[row, row]).expect("2 samples");
        assert_eq!(pca.explained_variance, [0.0, 0.0]);
        assert!(pca.coords.iter().flatten().all(|v| *v == 0.0));
    }

    #[test]
    fn test_standardized_columns_have_unit_variance() {
        let z = standardize(&full());
        for j in 0..FEATURE_COUNT {
            let col: Vec<f64> = z.iter().map(|r| r[j]).collect();
            assert!(mean(&col).abs() < 1e-12);
            assert!((sample_std(&col).unwrap() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_dominant_index_tie_prefers_lower_index() {
        assert_eq!(dominant_index(&[0.5, -0.5, 0.5, 0.5]), 0);
        let mut v = [-0.5, 0.5, 0.5, 0.5];
        orient(&mut v);
        assert_eq!(v, [0.5, -0.5, -0.5, -0.5]);
    }
}
