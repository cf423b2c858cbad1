//! Keyword-based column resolution for survey export sheets.
//!
//! Upstream schemas shift between survey tool releases: questions are
//! reworded, columns reordered, sections renamed. Instead of fixed column
//! names, each semantically important column is located by a case-insensitive
//! substring match over the sheet's declared column order, the first match
//! winning deterministically. Resolution runs once per report generation and
//! produces fixed mappings consumed by every later stage.

use arrow::record_batch::RecordBatch;
use log::debug;

use crate::config::QcConfig;
use crate::error::{QcError, Result};

/// Return the first column whose name contains `keyword`, case-insensitively
///
/// Follows the batch's declared column order so the first lexical match wins
/// deterministically. Returns `None` when nothing matches or the batch has
/// no columns; never errors.
#[must_use]
pub fn find_column(batch: &RecordBatch, keyword: &str) -> Option<String> {
    let keyword = keyword.to_lowercase();
    batch
        .schema()
        .fields()
        .iter()
        .find(|f| f.name().to_lowercase().contains(&keyword))
        .map(|f| f.name().clone())
}

/// Find a column by exact name, falling back to keyword search
fn exact_or_keyword(batch: &RecordBatch, name: &str) -> Option<String> {
    if batch.schema().field_with_name(name).is_ok() {
        Some(name.to_string())
    } else {
        find_column(batch, name)
    }
}

/// Resolved column names for the household sheet
#[derive(Debug, Clone)]
pub struct HouseholdColumns {
    /// Submission identifier (primary key of the sheet)
    pub uuid: String,
    /// Unique household code (duplicate-detection key)
    pub unique_code: Option<String>,
    /// Enumerator name
    pub enumerator: Option<String>,
    /// LGA column of the location hierarchy
    pub lga: Option<String>,
    /// Ward column of the location hierarchy
    pub ward: Option<String>,
    /// Community column of the location hierarchy
    pub community: Option<String>,
    /// Consent date
    pub consent_date: Option<String>,
    /// Validation status
    pub validation_status: Option<String>,
    /// Submission timestamp
    pub start: Option<String>,
}

impl HouseholdColumns {
    /// Resolve household columns once for a report run
    ///
    /// # Errors
    /// Returns a schema error when the submission id column cannot be
    /// located at all; every other column degrades to `None`.
    pub fn resolve(batch: &RecordBatch, config: &QcConfig) -> Result<Self> {
        let uuid = exact_or_keyword(batch, &config.household_uuid_column).ok_or_else(|| {
            QcError::Schema(format!(
                "submission id column '{}' not found in household sheet",
                config.household_uuid_column
            ))
        })?;

        let resolved = Self {
            uuid,
            unique_code: find_column(batch, &config.unique_code_keyword),
            enumerator: find_column(batch, &config.enumerator_keyword),
            lga: find_column(batch, &config.lga_keyword),
            ward: find_column(batch, &config.ward_keyword),
            community: find_column(batch, &config.community_keyword),
            consent_date: find_column(batch, &config.consent_date_keyword),
            validation_status: find_column(batch, &config.validation_status_keyword),
            start: exact_or_keyword(batch, &config.start_column),
        };
        debug!("resolved household columns: {resolved:?}");
        Ok(resolved)
    }
}

/// Resolved column names for the per-woman sheet
#[derive(Debug, Clone)]
pub struct WomanColumns {
    /// Submission identifier foreign key
    pub submission_uuid: String,
    /// Per-woman identifier (duplicate-detection key)
    pub mother_id: Option<String>,
    /// Self-reported children-currently-alive count
    pub children_alive: Option<String>,
    /// Self-reported children-who-died count
    pub children_dead: Option<String>,
    /// Self-reported miscarriage/abortion count
    pub miscarriages: Option<String>,
    /// Self-reported sons-who-died count
    pub sons_dead: Option<String>,
    /// Self-reported daughters-who-died count
    pub daughters_dead: Option<String>,
}

impl WomanColumns {
    /// Resolve woman-sheet columns once for a report run
    ///
    /// # Errors
    /// Returns a schema error when the submission id foreign key cannot be
    /// located; the five count columns degrade to `None` (summed as zero).
    pub fn resolve(batch: &RecordBatch, config: &QcConfig) -> Result<Self> {
        let submission_uuid =
            exact_or_keyword(batch, &config.submission_uuid_column).ok_or_else(|| {
                QcError::Schema(format!(
                    "submission id column '{}' not found in woman sheet",
                    config.submission_uuid_column
                ))
            })?;

        let resolved = Self {
            submission_uuid,
            mother_id: exact_or_keyword(batch, &config.mother_id_column),
            children_alive: find_column(batch, &config.children_alive_keyword),
            children_dead: find_column(batch, &config.children_dead_keyword),
            miscarriages: find_column(batch, &config.miscarriage_keyword),
            sons_dead: find_column(batch, &config.sons_dead_keyword),
            daughters_dead: find_column(batch, &config.daughters_dead_keyword),
        };
        debug!("resolved woman columns: {resolved:?}");
        Ok(resolved)
    }
}

/// Resolved column names for the pregnancy-event sheet
#[derive(Debug, Clone)]
pub struct PregnancyColumns {
    /// Submission identifier foreign key
    pub submission_uuid: String,
    /// Per-child identifier (duplicate-detection key)
    pub child_id: Option<String>,
    /// Birth outcome column
    pub outcome: Option<String>,
    /// Independent still-alive indicator column
    pub still_alive: Option<String>,
}

impl PregnancyColumns {
    /// Resolve pregnancy-sheet columns once for a report run
    ///
    /// # Errors
    /// Returns a schema error when the submission id foreign key cannot be
    /// located; outcome and still-alive degrade to `None` (all-unknown).
    pub fn resolve(batch: &RecordBatch, config: &QcConfig) -> Result<Self> {
        let submission_uuid =
            exact_or_keyword(batch, &config.submission_uuid_column).ok_or_else(|| {
                QcError::Schema(format!(
                    "submission id column '{}' not found in pregnancy sheet",
                    config.submission_uuid_column
                ))
            })?;

        let resolved = Self {
            submission_uuid,
            child_id: exact_or_keyword(batch, &config.child_id_column),
            outcome: find_column(batch, &config.outcome_keyword),
            still_alive: find_column(batch, &config.still_alive_keyword),
        };
        debug!("resolved pregnancy columns: {resolved:?}");
        Ok(resolved)
    }
}
