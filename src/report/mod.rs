//! Report assembly and summaries.
//!
//! Merges the consistency checks with the duplicate passes, attaches the
//! enumerator from the household sheet, and produces the per-submission
//! rows the display shell renders, plus the summary counts for the QC and
//! operational metric strips.

use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::aggregate::MergedAggregate;
use crate::duplicates::DuplicateFlags;
use crate::model::{Issue, QcRecord};
use crate::reconcile::consistency_issues;
use crate::schema::{HouseholdColumns, WomanColumns};
use crate::utils::string_at;

/// The assembled per-submission QC report
#[derive(Debug, Clone, Default, Serialize)]
pub struct QcReport {
    /// One row per submission identifier, in deterministic order
    pub records: Vec<QcRecord>,
}

impl QcReport {
    /// Total flags across all submissions
    #[must_use]
    pub fn total_flags(&self) -> u32 {
        self.records.iter().map(QcRecord::flag_count).sum()
    }

    /// Number of submissions with at least one flag
    #[must_use]
    pub fn flagged_count(&self) -> usize {
        self.records.iter().filter(|r| !r.issues.is_empty()).count()
    }

    /// Number of submissions carrying a given issue
    #[must_use]
    pub fn count_issue(&self, issue: Issue) -> usize {
        self.records
            .iter()
            .filter(|r| r.issues.contains(&issue))
            .count()
    }

    /// Sort rows by flag count, descending (display order for review queues)
    pub fn sort_by_flags(&mut self) {
        self.records.sort_by_key(|r| std::cmp::Reverse(r.flag_count()));
    }

    /// Keep only rows whose submission id is in `ids`, preserving order
    ///
    /// Used by the shell to restrict the report to the households surviving
    /// its sidebar filters.
    #[must_use]
    pub fn restrict_to(&self, ids: &FxHashSet<String>) -> Self {
        Self {
            records: self
                .records
                .iter()
                .filter(|r| ids.contains(&r.submission_uuid))
                .cloned()
                .collect(),
        }
    }

    /// Total flags per enumerator, descending (the errors-by-enumerator chart)
    ///
    /// Rows whose enumerator never resolved are left out, matching the
    /// grouped chart upstream.
    #[must_use]
    pub fn flags_by_enumerator(&self) -> Vec<(String, u32)> {
        let mut totals: FxHashMap<&str, u32> = FxHashMap::default();
        for record in &self.records {
            if let Some(name) = record.enumerator.as_deref() {
                *totals.entry(name).or_insert(0) += record.flag_count();
            }
        }
        totals
            .into_iter()
            .map(|(name, flags)| (name.to_string(), flags))
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
            .collect()
    }
}

/// Per-issue flagged-submission counts for the QC summary strip
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QcSummary {
    /// Submissions flagged with a household-code collision
    pub duplicate_household: usize,
    /// Submissions flagged with a mother-id collision
    pub duplicate_mother: usize,
    /// Submissions flagged with a child-id collision
    pub duplicate_child: usize,
    /// Submissions with an alive-count mismatch
    pub alive_count_mismatch: usize,
    /// Submissions with a later-died mismatch
    pub later_died_mismatch: usize,
    /// Submissions with a miscarriage mismatch
    pub miscarriage_mismatch: usize,
}

impl QcSummary {
    /// Count flagged submissions per issue type
    #[must_use]
    pub fn from_report(report: &QcReport) -> Self {
        Self {
            duplicate_household: report.count_issue(Issue::DuplicateHousehold),
            duplicate_mother: report.count_issue(Issue::DuplicateMother),
            duplicate_child: report.count_issue(Issue::DuplicateChild),
            alive_count_mismatch: report.count_issue(Issue::AliveCountMismatch),
            later_died_mismatch: report.count_issue(Issue::LaterDiedMismatch),
            miscarriage_mismatch: report.count_issue(Issue::MiscarriageMismatch),
        }
    }
}

/// Operational coverage metrics over the household sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverageSummary {
    /// Distinct households reached (unique submission ids)
    pub households_reached: usize,
    /// Distinct enumerators active
    pub active_enumerators: usize,
    /// Distinct wards reached
    pub wards_reached: usize,
    /// Distinct communities reached
    pub communities_reached: usize,
}

impl CoverageSummary {
    /// Compute coverage metrics from the household sheet
    ///
    /// Columns that never resolved contribute a zero metric.
    #[must_use]
    pub fn from_household(batch: &RecordBatch, cols: &HouseholdColumns) -> Self {
        let distinct = |name: Option<&str>| -> usize {
            let Some(array) = name.and_then(|n| batch.column_by_name(n)) else {
                return 0;
            };
            (0..batch.num_rows())
                .filter_map(|row| string_at(array, row))
                .collect::<FxHashSet<_>>()
                .len()
        };

        Self {
            households_reached: distinct(Some(cols.uuid.as_str())),
            active_enumerators: distinct(cols.enumerator.as_deref()),
            wards_reached: distinct(cols.ward.as_deref()),
            communities_reached: distinct(cols.community.as_deref()),
        }
    }
}

/// Assemble the final report from the merged aggregates and duplicate flags
///
/// The row universe is the union of the three relations' submission ids:
/// household rows first (deduplicated to first occurrence, in sheet order),
/// then detail-only submissions in merged-aggregate order. Each id appears
/// exactly once.
#[must_use]
pub fn assemble_report(
    merged: &[MergedAggregate],
    wcols: &WomanColumns,
    duplicates: &DuplicateFlags,
    household: &RecordBatch,
    hcols: &HouseholdColumns,
) -> QcReport {
    let uuid_col = household
        .column_by_name(&hcols.uuid)
        .expect("household id column was resolved against this batch");
    let enumerator_col = hcols
        .enumerator
        .as_deref()
        .and_then(|n| household.column_by_name(n));

    // Enumerator per submission, first household occurrence wins
    let mut enumerators: FxHashMap<String, Option<String>> = FxHashMap::default();
    let mut universe: Vec<String> = Vec::with_capacity(household.num_rows());
    let mut seen: FxHashSet<String> = FxHashSet::default();
    for row in 0..household.num_rows() {
        let Some(uuid) = string_at(uuid_col, row) else {
            continue;
        };
        if seen.insert(uuid.clone()) {
            let name = enumerator_col.and_then(|a| string_at(a, row));
            enumerators.insert(uuid.clone(), name);
            universe.push(uuid);
        }
    }

    let mut consistency: FxHashMap<&str, Vec<Issue>> = FxHashMap::default();
    for row in merged {
        consistency.insert(row.submission_uuid.as_str(), consistency_issues(row, wcols));
        if !seen.contains(&row.submission_uuid) {
            // Detail rows whose submission never reached the household sheet
            seen.insert(row.submission_uuid.clone());
            universe.push(row.submission_uuid.clone());
        }
    }

    let records = universe
        .into_iter()
        .map(|uuid| {
            let mut issues = consistency.remove(uuid.as_str()).unwrap_or_default();
            let duplicate_household = duplicates.household.contains(&uuid);
            let duplicate_mother = duplicates.mother.contains(&uuid);
            let duplicate_child = duplicates.child.contains(&uuid);
            if duplicate_household {
                issues.push(Issue::DuplicateHousehold);
            }
            if duplicate_mother {
                issues.push(Issue::DuplicateMother);
            }
            if duplicate_child {
                issues.push(Issue::DuplicateChild);
            }
            let enumerator = enumerators.remove(&uuid).flatten();
            QcRecord {
                submission_uuid: uuid,
                enumerator,
                issues,
                duplicate_household,
                duplicate_mother,
                duplicate_child,
            }
        })
        .collect();

    QcReport { records }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QcRecord;

    fn record(uuid: &str, enumerator: Option<&str>, issues: Vec<Issue>) -> QcRecord {
        QcRecord {
            duplicate_household: issues.contains(&Issue::DuplicateHousehold),
            duplicate_mother: issues.contains(&Issue::DuplicateMother),
            duplicate_child: issues.contains(&Issue::DuplicateChild),
            submission_uuid: uuid.to_string(),
            enumerator: enumerator.map(str::to_string),
            issues,
        }
    }

    #[test]
    fn test_summary_counts_submissions_not_flags() {
        let report = QcReport {
            records: vec![
                record("u1", Some("A"), vec![Issue::AliveCountMismatch, Issue::DuplicateChild]),
                record("u2", Some("B"), vec![Issue::AliveCountMismatch]),
                record("u3", None, vec![]),
            ],
        };
        let summary = QcSummary::from_report(&report);
        assert_eq!(summary.alive_count_mismatch, 2);
        assert_eq!(summary.duplicate_child, 1);
        assert_eq!(summary.duplicate_household, 0);
        assert_eq!(report.flagged_count(), 2);
        assert_eq!(report.total_flags(), 3);
    }

    #[test]
    fn test_flags_by_enumerator_sorted_descending() {
        let report = QcReport {
            records: vec![
                record("u1", Some("Amina"), vec![Issue::AliveCountMismatch]),
                record("u2", Some("Bashir"), vec![Issue::AliveCountMismatch, Issue::DuplicateMother]),
                record("u3", Some("Amina"), vec![]),
                record("u4", None, vec![Issue::DuplicateChild]),
            ],
        };
        assert_eq!(
            report.flags_by_enumerator(),
            vec![("Bashir".to_string(), 2), ("Amina".to_string(), 1)]
        );
    }

    #[test]
    fn test_restrict_to_preserves_order() {
        let report = QcReport {
            records: vec![
                record("u1", None, vec![]),
                record("u2", None, vec![]),
                record("u3", None, vec![]),
            ],
        };
        let keep: FxHashSet<String> = ["u3".to_string(), "u1".to_string()].into_iter().collect();
        let restricted = report.restrict_to(&keep);
        let ids: Vec<&str> = restricted
            .records
            .iter()
            .map(|r| r.submission_uuid.as_str())
            .collect();
        assert_eq!(ids, vec!["u1", "u3"]);
    }
}
