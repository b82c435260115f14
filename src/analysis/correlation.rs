use serde::Serialize;

use super::{column, is_constant, mean};
use crate::data::{FEATURE_COUNT, Feature, Sample};

/// Pairwise Pearson correlations over the four features.
///
/// `None` marks a pair that cannot be computed (fewer than two samples, or
/// a feature with zero variance). The diagonal is always `Some(1.0)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    values: [[Option<f64>; FEATURE_COUNT]; FEATURE_COUNT],
}

impl CorrelationMatrix {
    pub fn get(&self, a: Feature, b: Feature) -> Option<f64> {
        self.values[a.index()][b.index()]
    }

    /// Row-major view, rows and columns in [`Feature::ALL`] order.
    pub fn rows(&self) -> &[[Option<f64>; FEATURE_COUNT]; FEATURE_COUNT] {
        &self.values
    }

    /// Off-diagonal pair with the largest absolute defined correlation.
    pub fn strongest_pair(&self) -> Option<(Feature, Feature, f64)> {
        let mut best: Option<(Feature, Feature, f64)> = None;
        for (i, &a) in Feature::ALL.iter().enumerate() {
            for &b in &Feature::ALL[i + 1..] {
                if let Some(r) = self.get(a, b) {
                    if best.map_or(true, |(_, _, cur)| r.abs() > cur.abs()) {
                        best = Some((a, b, r));
                    }
                }
            }
        }
        best
    }
}

/// Pearson correlation for every feature pair, sample (n-1) statistics.
pub fn correlate(subset: &[Sample]) -> CorrelationMatrix {
    let mut values = [[None; FEATURE_COUNT]; FEATURE_COUNT];
    let columns: Vec<Vec<f64>> = (0..FEATURE_COUNT).map(|j| column(subset, j)).collect();

    for i in 0..FEATURE_COUNT {
        values[i][i] = Some(1.0);
        for j in i + 1..FEATURE_COUNT {
            let r = pearson(&columns[i], &columns[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix { values }
}

/// The n-1 factors of the covariance and both deviations cancel.
fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() < 2 || is_constant(x) || is_constant(y) {
        return None;
    }
    let (mx, my) = (mean(x), mean(y));
    let (sxy, sxx, syy) = x
        .iter()
        .zip(y)
        .fold((0.0, 0.0, 0.0), |(sxy, sxx, syy), (&xi, &yi)| {
            let dx = xi - mx;
            let dy = yi - my;
            (sxy + dx * dy, sxx + dx * dx, syy + dy * dy)
        });
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}
