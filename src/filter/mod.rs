//! Household pre-filtering.
//!
//! The display shell narrows the household sheet by location, enumerator,
//! and collection day before rendering, and drops not-approved submissions.
//! Filters are expressed as a boolean mask over the household batch; the
//! surviving submission ids then restrict the woman and pregnancy sheets and
//! the assembled report.

use anyhow::Context;
use arrow::array::{ArrayRef, BooleanArray};
use arrow::compute::filter as arrow_filter;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use rustc_hash::FxHashSet;

use crate::config::QcConfig;
use crate::error::{QcError, Result};
use crate::model::ValidationStatus;
use crate::schema::HouseholdColumns;
use crate::utils::{date_at, string_at};

/// Filter a record batch based on a boolean mask
///
/// # Errors
/// Returns an error if the mask length does not match the batch or a column
/// cannot be filtered.
pub fn filter_record_batch(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    if batch.num_rows() != mask.len() {
        return Err(QcError::Schema(format!(
            "mask length ({}) doesn't match batch row count ({})",
            mask.len(),
            batch.num_rows()
        )));
    }

    let filtered_columns: Vec<ArrayRef> = batch
        .columns()
        .iter()
        .map(|col| arrow_filter(col, mask))
        .collect::<arrow::error::Result<_>>()
        .with_context(|| "Failed to apply boolean filter to columns")?;

    RecordBatch::try_new(batch.schema(), filtered_columns)
        .with_context(|| "Failed to create filtered record batch")
        .map_err(Into::into)
}

/// Criteria narrowing the household sheet before display
///
/// Every criterion is optional; a criterion whose column never resolved is
/// ignored rather than failing the run.
#[derive(Debug, Clone, Default)]
pub struct HouseholdFilter {
    /// Keep only this LGA
    pub lga: Option<String>,
    /// Keep only this ward
    pub ward: Option<String>,
    /// Keep only this community
    pub community: Option<String>,
    /// Keep only this enumerator
    pub enumerator: Option<String>,
    /// Keep only submissions collected on this calendar day
    pub collection_date: Option<NaiveDate>,
}

impl HouseholdFilter {
    /// Apply the criteria plus the validation-status policy to the household sheet
    ///
    /// Missing validation status parses as pending; `NotApproved` rows drop
    /// when `config.exclude_not_approved` is set. Rows whose timestamp does
    /// not parse drop out of date filtering only.
    ///
    /// # Errors
    /// Returns an error if the surviving rows cannot be materialized.
    pub fn apply(
        &self,
        batch: &RecordBatch,
        cols: &HouseholdColumns,
        config: &QcConfig,
    ) -> Result<RecordBatch> {
        let column = |name: Option<&str>| name.and_then(|n| batch.column_by_name(n));
        let lga_col = column(cols.lga.as_deref());
        let ward_col = column(cols.ward.as_deref());
        let community_col = column(cols.community.as_deref());
        let enumerator_col = column(cols.enumerator.as_deref());
        let start_col = column(cols.start.as_deref());
        let status_col = column(cols.validation_status.as_deref());

        let text_matches = |col: Option<&ArrayRef>, wanted: Option<&String>, row: usize| -> bool {
            match (col, wanted) {
                (Some(array), Some(wanted)) => {
                    string_at(array, row).is_some_and(|v| v.trim() == wanted.as_str())
                }
                // Unresolved column or no criterion: pass
                _ => true,
            }
        };

        let mask: Vec<bool> = (0..batch.num_rows())
            .map(|row| {
                if !text_matches(lga_col, self.lga.as_ref(), row)
                    || !text_matches(ward_col, self.ward.as_ref(), row)
                    || !text_matches(community_col, self.community.as_ref(), row)
                    || !text_matches(enumerator_col, self.enumerator.as_ref(), row)
                {
                    return false;
                }
                if let (Some(array), Some(day)) = (start_col, self.collection_date) {
                    if date_at(array, row) != Some(day) {
                        return false;
                    }
                }
                if config.exclude_not_approved {
                    let status = ValidationStatus::from(
                        status_col.and_then(|a| string_at(a, row)).as_deref(),
                    );
                    if status == ValidationStatus::NotApproved {
                        return false;
                    }
                }
                true
            })
            .collect();

        filter_record_batch(batch, &BooleanArray::from(mask))
    }
}

/// Collect the submission ids of a (possibly filtered) household batch
#[must_use]
pub fn submission_ids(batch: &RecordBatch, cols: &HouseholdColumns) -> FxHashSet<String> {
    let Some(uuid_col) = batch.column_by_name(&cols.uuid) else {
        return FxHashSet::default();
    };
    (0..batch.num_rows())
        .filter_map(|row| string_at(uuid_col, row))
        .collect()
}
