//! Per-feature descriptive statistics behind the histogram, box-plot,
//! scatter and data views.

use serde::Serialize;

use super::{by_species, mean, sample_std};
use crate::data::{Feature, Sample, Species};
use crate::error::{AnalysisError, Result};

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width bin counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// `bins + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    /// Center of every bin, paired with its count.
    pub fn centers(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &c)| ((w[0] + w[1]) / 2.0, c))
    }
}

/// Bin `values` into `bins` equal-width bins over `[min, max]`.
///
/// Bins are half-open except the last, which also takes `max`. A constant
/// input is spread over `[v - 0.5, v + 0.5]`. `bins == 0` is treated as 1.
pub fn histogram(values: &[f64], bins: usize) -> Result<Histogram> {
    if values.is_empty() {
        return Err(AnalysisError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    let bins = bins.max(1);
    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut edges: Vec<f64> = (0..bins).map(|i| lo + i as f64 * width).collect();
    edges.push(hi);

    let mut counts = vec![0; bins];
    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Ok(Histogram { edges, counts })
}

/// One histogram per species present in `subset`, canonical order.
pub fn feature_histograms(
    subset: &[Sample],
    feature: Feature,
    bins: usize,
) -> Vec<(Species, Histogram)> {
    by_species(subset)
        .into_iter()
        .filter_map(|(sp, rows)| {
            let values: Vec<f64> = rows.iter().map(|s| s.value(feature)).collect();
            histogram(&values, bins).ok().map(|h| (sp, h))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

/// Five-number summary with Tukey fences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest value at or above `q1 - whis * IQR`.
    pub lower_whisker: f64,
    /// Largest value at or below `q3 + whis * IQR`.
    pub upper_whisker: f64,
    /// Values beyond the fences, ascending.
    pub outliers: Vec<f64>,
}

/// Quantile of ascending `sorted` by linear interpolation between ranks.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

pub fn box_stats(values: &[f64], whis: f64) -> Result<BoxStats> {
    if values.is_empty() {
        return Err(AnalysisError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    let v = sorted(values);
    let q1 = quantile(&v, 0.25);
    let median = quantile(&v, 0.5);
    let q3 = quantile(&v, 0.75);
    let iqr = q3 - q1;
    let low_fence = q1 - whis * iqr;
    let high_fence = q3 + whis * iqr;

    // q1 >= low_fence and q3 <= high_fence, so both searches hit.
    let lower_whisker = v.iter().copied().find(|&x| x >= low_fence).unwrap_or(q1);
    let upper_whisker = v.iter().rev().copied().find(|&x| x <= high_fence).unwrap_or(q3);
    let outliers = v
        .iter()
        .copied()
        .filter(|&x| x < low_fence || x > high_fence)
        .collect();

    Ok(BoxStats {
        q1,
        median,
        q3,
        lower_whisker,
        upper_whisker,
        outliers,
    })
}

/// One box per species present in `subset`, canonical order.
pub fn feature_boxes(subset: &[Sample], feature: Feature, whis: f64) -> Vec<(Species, BoxStats)> {
    by_species(subset)
        .into_iter()
        .filter_map(|(sp, rows)| {
            let values: Vec<f64> = rows.iter().map(|s| s.value(feature)).collect();
            box_stats(&values, whis).ok().map(|b| (sp, b))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Column summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` for a single value.
    pub std: Option<f64>,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

pub fn feature_stats(subset: &[Sample], feature: Feature) -> Result<FeatureStats> {
    if subset.is_empty() {
        return Err(AnalysisError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    let values: Vec<f64> = subset.iter().map(|s| s.value(feature)).collect();
    let v = sorted(&values);
    Ok(FeatureStats {
        count: v.len(),
        mean: mean(&v),
        std: sample_std(&v),
        min: v[0],
        median: quantile(&v, 0.5),
        max: v[v.len() - 1],
    })
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

/// `(x, y)` pairs per species present in `subset`, canonical order.
pub fn scatter_points(subset: &[Sample], x: Feature, y: Feature) -> Vec<(Species, Vec<[f64; 2]>)> {
    by_species(subset)
        .into_iter()
        .map(|(sp, rows)| (sp, rows.iter().map(|s| [s.value(x), s.value(y)]).collect()))
        .collect()
}
