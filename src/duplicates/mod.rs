//! Duplicate detection over the three relations.
//!
//! Each pass groups one relation by a natural key expected to be unique and
//! marks every member of a colliding group, not just second-and-later
//! occurrences: supervisors need to review all copies to decide which one
//! stands. A pass yields the set of submission identifiers owning at least
//! one row in a collision group.

use arrow::array::ArrayRef;
use arrow::record_batch::RecordBatch;
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::schema::{HouseholdColumns, PregnancyColumns, WomanColumns};
use crate::utils::string_at;

/// Submission identifiers flagged by the three duplicate passes
#[derive(Debug, Clone, Default)]
pub struct DuplicateFlags {
    /// Submissions whose household row shares a unique code
    pub household: FxHashSet<String>,
    /// Submissions owning a woman row with a shared mother id
    pub mother: FxHashSet<String>,
    /// Submissions owning a pregnancy row with a shared child id
    pub child: FxHashSet<String>,
}

/// Collect submission ids whose key value occurs on more than one row
///
/// Null key values never collide. Every member of a collision group is
/// collected, including the first occurrence.
fn collision_submissions(
    batch: &RecordBatch,
    key: Option<&ArrayRef>,
    uuid: &ArrayRef,
) -> FxHashSet<String> {
    let Some(key) = key else {
        return FxHashSet::default();
    };

    let mut groups: FxHashMap<String, Vec<usize>> = FxHashMap::default();
    for row in 0..batch.num_rows() {
        if let Some(value) = string_at(key, row) {
            groups.entry(value).or_default().push(row);
        }
    }

    let mut flagged = FxHashSet::default();
    for rows in groups.values() {
        if rows.len() > 1 {
            for &row in rows {
                if let Some(id) = string_at(uuid, row) {
                    flagged.insert(id);
                }
            }
        }
    }
    flagged
}

/// Run the three duplicate passes over the household, woman, and pregnancy sheets
#[must_use]
pub fn detect_duplicates(
    household: &RecordBatch,
    hcols: &HouseholdColumns,
    women: &RecordBatch,
    wcols: &WomanColumns,
    pregnancies: &RecordBatch,
    pcols: &PregnancyColumns,
) -> DuplicateFlags {
    let household_uuid = household
        .column_by_name(&hcols.uuid)
        .expect("household id column was resolved against this batch");
    let woman_uuid = women
        .column_by_name(&wcols.submission_uuid)
        .expect("woman submission id column was resolved against this batch");
    let pregnancy_uuid = pregnancies
        .column_by_name(&pcols.submission_uuid)
        .expect("pregnancy submission id column was resolved against this batch");

    let flags = DuplicateFlags {
        household: collision_submissions(
            household,
            hcols
                .unique_code
                .as_deref()
                .and_then(|n| household.column_by_name(n)),
            household_uuid,
        ),
        mother: collision_submissions(
            women,
            wcols.mother_id.as_deref().and_then(|n| women.column_by_name(n)),
            woman_uuid,
        ),
        child: collision_submissions(
            pregnancies,
            pcols
                .child_id
                .as_deref()
                .and_then(|n| pregnancies.column_by_name(n)),
            pregnancy_uuid,
        ),
    };
    debug!(
        "duplicate passes flagged {} household, {} mother, {} child submissions",
        flags.household.len(),
        flags.mother.len(),
        flags.child.len()
    );
    flags
}
