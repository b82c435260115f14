use std::collections::BTreeSet;

use crate::data::{Dataset, Sample, Species};
use crate::error::{AnalysisError, Result};

// ---------------------------------------------------------------------------
// Selection: which species are currently included in a view
// ---------------------------------------------------------------------------

/// Set of selected species. Must hold 1–3 labels when passed to [`filter`].
pub type Selection = BTreeSet<Species>;

/// A selection with every species in it (show everything).
pub fn full_selection() -> Selection {
    Species::ALL.into_iter().collect()
}

/// Parse user-supplied labels into a [`Selection`].
///
/// Fails on an empty list or on any label outside the species set.
/// Duplicates collapse.
pub fn parse_selection<S: AsRef<str>>(labels: &[S]) -> Result<Selection> {
    if labels.is_empty() {
        return Err(AnalysisError::InvalidSelection(
            "at least one species must be selected".into(),
        ));
    }
    labels.iter().map(|l| l.as_ref().parse::<Species>()).collect()
}

/// Return the samples whose species is in `selection`, in dataset order.
pub fn filter(dataset: &Dataset, selection: &Selection) -> Result<Vec<Sample>> {
    if selection.is_empty() {
        return Err(AnalysisError::InvalidSelection(
            "at least one species must be selected".into(),
        ));
    }
    Ok(dataset
        .samples()
        .iter()
        .filter(|s| selection.contains(&s.species))
        .copied()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load;
    use proptest::prelude::*;

    #[test]
    fn test_filter_setosa_only() {
        let ds = load().expect("dataset");
        let sel: Selection = [Species::Setosa].into_iter().collect();
        let subset = filter(&ds, &sel).expect("non-empty selection");
        assert_eq!(subset.len(), 50);
        assert!(subset.iter().all(|s| s.species == Species::Setosa));
    }

    #[test]
    fn test_filter_full_selection_is_identity() {
        let ds = load().expect("dataset");
        let subset = filter(&ds, &full_selection()).expect("full selection");
        assert_eq!(subset.as_slice(), ds.samples());
    }

    #[test]
    fn test_filter_empty_selection_rejected() {
        let ds = load().expect("dataset");
        let err = filter(&ds, &Selection::new()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidSelection(_)));
    }

    #[test]
    fn test_parse_selection() {
        let sel = parse_selection(&["virginica", "Setosa", "setosa"]).expect("valid labels");
        assert_eq!(sel.len(), 2);
        assert!(sel.contains(&Species::Setosa));
        assert!(sel.contains(&Species::Virginica));
    }

    #[test]
    fn test_parse_selection_rejects_empty_and_unknown() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            parse_selection(&empty),
            Err(AnalysisError::InvalidSelection(_))
        ));
        assert!(matches!(
            parse_selection(&["Setosa", "Tulip"]),
            Err(AnalysisError::InvalidSelection(_))
        ));
    }

    fn selection_strategy() -> impl Strategy<Value = Selection> {
        proptest::sample::subsequence(Species::ALL.to_vec(), 1..=3)
            .prop_map(|v| v.into_iter().collect())
    }

    proptest! {
        /// Filtering keeps only selected labels and preserves dataset order.
        #[test]
        fn prop_filter_is_stable(sel in selection_strategy()) {
            let ds = load().expect("dataset");
            let subset = filter(&ds, &sel).expect("non-empty selection");

            prop_assert!(subset.iter().all(|s| sel.contains(&s.species)));

            // The bundled table is stored in 50-row species blocks.
            let expected: Vec<Sample> = Species::ALL
                .iter()
                .enumerate()
                .filter(|(_, sp)| sel.contains(sp))
                .flat_map(|(i, _)| ds.samples()[i * 50..(i + 1) * 50].iter().copied())
                .collect();
            prop_assert_eq!(subset.len(), sel.len() * 50);
            prop_assert_eq!(subset, expected);
        }
    }
}
