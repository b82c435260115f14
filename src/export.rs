use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

use crate::analysis::ProjectionResult;
use crate::data::Sample;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// One exported row: the measurements joined with their PCA coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
    pub species: String,
    pub pc1: f64,
    pub pc2: f64,
}

pub fn records(subset: &[Sample], projection: &ProjectionResult) -> Result<Vec<ExportRecord>> {
    if subset.len() != projection.coords.len() {
        bail!(
            "{} samples but {} projected coordinates",
            subset.len(),
            projection.coords.len()
        );
    }
    Ok(subset
        .iter()
        .zip(&projection.coords)
        .map(|(s, &[pc1, pc2])| ExportRecord {
            sepal_length: s.features[0],
            sepal_width: s.features[1],
            petal_length: s.features[2],
            petal_width: s.features[3],
            species: s.species.to_string(),
            pc1,
            pc2,
        })
        .collect())
}

/// Write the filtered table with its projection.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` / `.pq` – one Arrow record batch
/// * `.json`    – `[{ "sepal_length": 5.1, ..., "pc1": -2.26, "pc2": 0.48 }, ...]`
/// * `.csv`     – header row, one line per sample
pub fn write(path: &Path, subset: &[Sample], projection: &ProjectionResult) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = records(subset, projection)?;
    match ext.as_str() {
        "parquet" | "pq" => write_parquet(path, &rows),
        "json" => write_json(path, &rows),
        "csv" => write_csv(path, &rows),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    log::info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn write_csv(path: &Path, rows: &[ExportRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_json(path: &Path, rows: &[ExportRecord]) -> Result<()> {
    let file = std::fs::File::create(path).context("creating JSON file")?;
    serde_json::to_writer_pretty(file, rows).context("writing JSON")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[ExportRecord]) -> Result<()> {
    let float_col = |f: fn(&ExportRecord) -> f64| Float64Array::from(rows.iter().map(f).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("sepal_length", DataType::Float64, false),
        Field::new("sepal_width", DataType::Float64, false),
        Field::new("petal_length", DataType::Float64, false),
        Field::new("petal_width", DataType::Float64, false),
        Field::new("species", DataType::Utf8, false),
        Field::new("pc1", DataType::Float64, false),
        Field::new("pc2", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(float_col(|r| r.sepal_length)),
            Arc::new(float_col(|r| r.sepal_width)),
            Arc::new(float_col(|r| r.petal_length)),
            Arc::new(float_col(|r| r.petal_width)),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.species.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(float_col(|r| r.pc1)),
            Arc::new(float_col(|r| r.pc2)),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}
