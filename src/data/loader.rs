use anyhow::{Context, Result, bail};
use serde::Deserialize;

use super::model::{Dataset, FEATURE_COUNT, Sample, Species};

/// The bundled table, compiled into the binary.
const IRIS_CSV: &str = include_str!("iris.csv");

/// Samples expected per species.
pub const SAMPLES_PER_SPECIES: usize = 50;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Materialize the bundled Iris dataset.
///
/// Parses the embedded CSV on every call; no filesystem or network access.
/// An error here means the bundled resource is corrupt, which callers treat
/// as fatal.
pub fn load() -> Result<Dataset> {
    let dataset = parse_csv(IRIS_CSV).context("parsing bundled iris table")?;
    validate(&dataset).context("validating bundled iris table")?;
    log::info!(
        "Loaded {} samples ({} species, {} features)",
        dataset.len(),
        Species::ALL.len(),
        FEATURE_COUNT
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// CSV layout: header row
/// `sepal_length,sepal_width,petal_length,petal_width,species`.
#[derive(Debug, Deserialize)]
struct IrisRecord {
    sepal_length: f64,
    sepal_width: f64,
    petal_length: f64,
    petal_width: f64,
    species: Species,
}

fn parse_csv(text: &str) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let mut samples = Vec::with_capacity(Species::ALL.len() * SAMPLES_PER_SPECIES);

    for (row_no, result) in reader.deserialize::<IrisRecord>().enumerate() {
        let rec = result.with_context(|| format!("CSV row {row_no}"))?;
        samples.push(Sample {
            features: [rec.sepal_length, rec.sepal_width, rec.petal_length, rec.petal_width],
            species: rec.species,
        });
    }

    Ok(Dataset::from_samples(samples))
}

fn validate(dataset: &Dataset) -> Result<()> {
    let expected = Species::ALL.len() * SAMPLES_PER_SPECIES;
    if dataset.len() != expected {
        bail!("expected {expected} samples, found {}", dataset.len());
    }
    for species in Species::ALL {
        let n = dataset.count_of(species);
        if n != SAMPLES_PER_SPECIES {
            bail!("expected {SAMPLES_PER_SPECIES} {species} samples, found {n}");
        }
    }
    for (row, sample) in dataset.samples().iter().enumerate() {
        if let Some(v) = sample.features.iter().find(|v| !v.is_finite() || **v < 0.0) {
            bail!("row {row}: measurement {v} is not a non-negative number");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_shape() {
        let ds = load().expect("bundled table loads");
        assert_eq!(ds.len(), 150);
        for species in Species::ALL {
            assert_eq!(ds.count_of(species), 50);
        }
    }

    #[test]
    fn test_load_is_idempotent() {
        let a = load().expect("first load");
        let b = load().expect("second load");
        assert_eq!(a, b);
    }

    #[test]
    fn test_first_and_last_rows() {
        let ds = load().expect("bundled table loads");
        let first = ds.samples()[0];
        assert_eq!(first.features, [5.1, 3.5, 1.4, 0.2]);
        assert_eq!(first.species, Species::Setosa);
        let last = ds.samples()[149];
        assert_eq!(last.features, [5.9, 3.0, 5.1, 1.8]);
        assert_eq!(last.species, Species::Virginica);
    }

    #[test]
    fn test_species_means() {
        let ds = load().expect("bundled table loads");
        let mean_of = |species: Species, col: usize| {
            let vals: Vec<f64> = ds
                .samples()
                .iter()
                .filter(|s| s.species == species)
                .map(|s| s.features[col])
                .collect();
            vals.iter().sum::<f64>() / vals.len() as f64
        };
        assert!((mean_of(Species::Setosa, 0) - 5.006).abs() < 1e-9);
        assert!((mean_of(Species::Versicolor, 2) - 4.26).abs() < 1e-9);
        assert!((mean_of(Species::Virginica, 3) - 2.026).abs() < 1e-9);
    }

    #[test]
    fn test_parse_rejects_unknown_species() {
        let text = "sepal_length,sepal_width,petal_length,petal_width,species\n5.1,3.5,1.4,0.2,Daisy\n";
        assert!(parse_csv(text).is_err());
    }

    #[test]
    fn test_validate_rejects_wrong_row_count() {
        let text = "sepal_length,sepal_width,petal_length,petal_width,species\n5.1,3.5,1.4,0.2,Setosa\n";
        let ds = parse_csv(text).expect("single row parses");
        let err = validate(&ds).unwrap_err();
        assert!(err.to_string().contains("expected 150 samples"));
    }
}
