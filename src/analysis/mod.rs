//! Analysis core: pure functions over a filtered sample table.
//!
//! Every operation takes an immutable slice and returns fresh values, so
//! the presentation layer can call it on every interaction.
//!
//! ```text
//!   Dataset ──filter(selection)──▶ Vec<Sample>
//!                                    │
//!        ┌───────────┬───────────────┼──────────────┬───────────┐
//!        ▼           ▼               ▼              ▼           ▼
//!    summarize    correlate       project      histograms   box stats
//! ```

pub mod correlation;
pub mod describe;
pub mod filter;
pub mod projection;
pub mod summary;

pub use correlation::{CorrelationMatrix, correlate};
pub use describe::{
    BoxStats, FeatureStats, Histogram, box_stats, feature_boxes, feature_histograms,
    feature_stats, histogram, scatter_points,
};
pub use filter::{Selection, filter, full_selection, parse_selection};
pub use projection::{COMPONENTS, ProjectionResult, project, standardize};
pub use summary::{Summary, summarize};

use crate::data::{Sample, Species};

// ---------------------------------------------------------------------------
// Shared column helpers
// ---------------------------------------------------------------------------

pub(crate) fn column(subset: &[Sample], index: usize) -> Vec<f64> {
    subset.iter().map(|s| s.features[index]).collect()
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// True when every value equals the first one (zero variance, exactly).
pub(crate) fn is_constant(values: &[f64]) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first),
        None => true,
    }
}

/// Sample standard deviation (n-1 denominator). `None` below 2 values.
pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Group the subset by species, canonical order, skipping absent species.
pub(crate) fn by_species(subset: &[Sample]) -> Vec<(Species, Vec<&Sample>)> {
    Species::ALL
        .into_iter()
        .map(|sp| (sp, subset.iter().filter(|s| s.species == sp).collect::<Vec<_>>()))
        .filter(|(_, rows)| !rows.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_std() {
        assert_eq!(sample_std(&[1.0]), None);
        let s = sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        // Population std is 2.0; sample std is sqrt(32/7).
        assert!((s - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_is_constant() {
        assert!(is_constant(&[]));
        assert!(is_constant(&[0.2, 0.2, 0.2]));
        assert!(!is_constant(&[0.2, 0.2, 0.3]));
    }
}
