//! Loading of survey snapshot files.
//!
//! The fetch collaborator materializes the three workbook sheets as Parquet
//! files in a snapshot directory; this module reads them back into Arrow
//! record batches. This is the only I/O path of the crate and runs once per
//! refresh cycle.

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use log::info;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::{QcError, Result};

/// File name of the household sheet inside a snapshot directory
pub const HOUSEHOLD_FILE: &str = "household.parquet";
/// File name of the per-woman sheet inside a snapshot directory
pub const WOMEN_FILE: &str = "women.parquet";
/// File name of the pregnancy-history sheet inside a snapshot directory
pub const PREGNANCIES_FILE: &str = "pregnancies.parquet";

/// The three sheets of one survey export snapshot
#[derive(Debug, Clone)]
pub struct SurveySnapshot {
    /// Household sheet, one row per submission
    pub household: RecordBatch,
    /// Per-woman sheet, zero or more rows per submission
    pub women: RecordBatch,
    /// Pregnancy-history sheet, zero or more rows per submission
    pub pregnancies: RecordBatch,
}

/// Read one sheet from a Parquet file into a single record batch
///
/// Row groups are concatenated so later stages see the sheet as one table
/// with its original row order.
pub fn read_sheet(path: &Path) -> Result<RecordBatch> {
    let start = Instant::now();
    let file = File::open(path)
        .with_context(|| format!("Failed to open sheet file: {}", path.display()))?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .with_context(|| format!("Failed to read parquet file: {}", path.display()))?;
    let schema = builder.schema().clone();
    let reader = builder
        .build()
        .with_context(|| format!("Failed to build parquet reader for {}", path.display()))?;

    let batches = reader
        .collect::<arrow::error::Result<Vec<RecordBatch>>>()
        .with_context(|| format!("Failed to decode record batches from {}", path.display()))?;
    let batch = concat_batches(&schema, &batches)?;

    info!(
        "Read {} rows from {} in {:?}",
        batch.num_rows(),
        path.display(),
        start.elapsed()
    );
    Ok(batch)
}

/// Load the three sheets of a snapshot directory
///
/// # Errors
/// Returns an error when the directory or any sheet file is missing or
/// unreadable. Empty sheets load successfully here; the engine rejects them
/// at generation time so the caller sees the documented empty-input signal.
pub fn load_survey_snapshot(dir: &Path) -> Result<SurveySnapshot> {
    if !dir.exists() || !dir.is_dir() {
        return Err(QcError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Snapshot directory does not exist: {}", dir.display()),
        )));
    }

    Ok(SurveySnapshot {
        household: read_sheet(&dir.join(HOUSEHOLD_FILE))?,
        women: read_sheet(&dir.join(WOMEN_FILE))?,
        pregnancies: read_sheet(&dir.join(PREGNANCIES_FILE))?,
    })
}
