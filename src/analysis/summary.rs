use std::collections::BTreeSet;

use serde::Serialize;

use crate::data::{FEATURE_COUNT, Sample, Species};

/// Aggregate counts shown in the metrics row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub distinct_labels: usize,
    pub feature_count: usize,
    /// Feature cells that are not finite numbers.
    pub missing_values: usize,
}

pub fn summarize(subset: &[Sample]) -> Summary {
    let labels: BTreeSet<Species> = subset.iter().map(|s| s.species).collect();
    let missing_values = subset
        .iter()
        .flat_map(|s| s.features.iter())
        .filter(|v| !v.is_finite())
        .count();
    Summary {
        count: subset.len(),
        distinct_labels: labels.len(),
        feature_count: FEATURE_COUNT,
        missing_values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{filter, full_selection, Selection};
    use crate::data::load;

    #[test]
    fn test_summarize_setosa() {
        let ds = load().expect("dataset");
        let sel: Selection = [Species::Setosa].into_iter().collect();
        let subset = filter(&ds, &sel).expect("filter");
        let summary = summarize(&subset);
        assert_eq!(summary.count, 50);
        assert_eq!(summary.distinct_labels, 1);
        assert_eq!(summary.feature_count, 4);
        assert_eq!(summary.missing_values, 0);
    }

    #[test]
    fn test_summarize_full() {
        let ds = load().expect("dataset");
        let subset = filter(&ds, &full_selection()).expect("filter");
        let summary = summarize(&subset);
        assert_eq!(summary.count, 150);
        assert_eq!(summary.distinct_labels, 3);
    }

    #[test]
    fn test_summarize_empty_and_missing() {
        assert_eq!(summarize(&[]).count, 0);
        assert_eq!(summarize(&[]).distinct_labels, 0);

        let odd = Sample {
            features: [f64::NAN, 1.0, f64::INFINITY, 0.5],
            species: Species::Virginica,
        };
        assert_eq!(summarize(&[odd]).missing_values, 2);
    }
}
