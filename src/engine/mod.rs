//! Orchestration of a single QC report generation.
//!
//! One generation is a pure, re-runnable function of the three input sheets:
//! resolve columns once, aggregate, reconcile, detect duplicates, assemble.
//! The engine holds configuration only; no state survives a run and no I/O
//! happens inside it.

use arrow::record_batch::RecordBatch;
use log::{debug, info};

use crate::aggregate::{aggregate_women, merge_aggregates, tally_pregnancies};
use crate::config::QcConfig;
use crate::duplicates::detect_duplicates;
use crate::error::{QcError, Result};
use crate::report::{QcReport, assemble_report};
use crate::schema::{HouseholdColumns, PregnancyColumns, WomanColumns};

/// Stateless QC report generator
#[derive(Debug, Clone, Default)]
pub struct QcEngine {
    config: QcConfig,
}

impl QcEngine {
    /// Create an engine with the given configuration
    #[must_use]
    pub fn new(config: QcConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration
    #[must_use]
    pub fn config(&self) -> &QcConfig {
        &self.config
    }

    /// Generate the per-submission QC report from the three sheets
    ///
    /// # Errors
    /// Returns `EmptyInput` when any sheet has no rows (an empty table is
    /// the documented failure signal from the fetch collaborator, and an
    /// all-zero report would be misleading), or a schema error when a join
    /// key cannot be located.
    pub fn generate(
        &self,
        household: &RecordBatch,
        women: &RecordBatch,
        pregnancies: &RecordBatch,
    ) -> Result<QcReport> {
        for (batch, relation) in [
            (household, "household"),
            (women, "women"),
            (pregnancies, "pregnancies"),
        ] {
            if batch.num_rows() == 0 {
                return Err(QcError::EmptyInput { relation });
            }
        }

        let hcols = HouseholdColumns::resolve(household, &self.config)?;
        let wcols = WomanColumns::resolve(women, &self.config)?;
        let pcols = PregnancyColumns::resolve(pregnancies, &self.config)?;

        let woman_agg = aggregate_women(women, &wcols);
        let pregnancy_agg = tally_pregnancies(pregnancies, &pcols, &self.config);
        debug!(
            "aggregated {} woman-side and {} pregnancy-side submissions",
            woman_agg.order.len(),
            pregnancy_agg.order.len()
        );

        let merged = merge_aggregates(&woman_agg, &pregnancy_agg);
        let duplicates = detect_duplicates(household, &hcols, women, &wcols, pregnancies, &pcols);
        let report = assemble_report(&merged, &wcols, &duplicates, household, &hcols);

        info!(
            "QC report: {} submissions, {} flagged, {} total flags",
            report.records.len(),
            report.flagged_count(),
            report.total_flags()
        );
        Ok(report)
    }
}
