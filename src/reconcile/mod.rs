//! Internal-consistency checks between reported and derived counts.
//!
//! Divergence between a woman's self-reported counts and the counts derived
//! from her pregnancy-event rows is the central defect signal of the report,
//! not an error condition. Checks run in a fixed order so the issue list is
//! stable for display.

use crate::aggregate::MergedAggregate;
use crate::model::Issue;
use crate::schema::WomanColumns;

/// Evaluate the three consistency checks for one merged comparison row
///
/// A check is skipped only when its governing reported-count column never
/// resolved (the column does not exist in the woman sheet). A resolved
/// column whose values all coerced to zero participates normally.
#[must_use]
pub fn consistency_issues(row: &MergedAggregate, cols: &WomanColumns) -> Vec<Issue> {
    let mut issues = Vec::new();

    if cols.children_alive.is_some() && row.woman.children_alive != row.tally.born_alive_and_alive {
        issues.push(Issue::AliveCountMismatch);
    }
    if cols.miscarriages.is_some() && row.woman.miscarriages != row.tally.miscarriage_or_stillbirth
    {
        issues.push(Issue::MiscarriageMismatch);
    }
    if cols.children_dead.is_some() && row.woman.children_dead != row.tally.later_died {
        issues.push(Issue::LaterDiedMismatch);
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{PregnancyTally, WomanAggregate};
    use crate::config::QcConfig;
    use crate::schema::WomanColumns;

    fn resolved_cols() -> WomanColumns {
        let config = QcConfig::default();
        WomanColumns {
            submission_uuid: config.submission_uuid_column.clone(),
            mother_id: Some(config.mother_id_column.clone()),
            children_alive: Some("c_alive".to_string()),
            children_dead: Some("c_dead".to_string()),
            miscarriages: Some("misscarraige".to_string()),
            sons_dead: Some("boys have died".to_string()),
            daughters_dead: Some("daughters have died".to_string()),
        }
    }

    fn row(woman: WomanAggregate, tally: PregnancyTally) -> MergedAggregate {
        MergedAggregate {
            submission_uuid: "u1".to_string(),
            woman,
            tally,
        }
    }

    #[test]
    fn test_all_checks_pass_on_agreement() {
        let r = row(
            WomanAggregate {
                children_alive: 2,
                children_dead: 1,
                miscarriages: 1,
                ..Default::default()
            },
            PregnancyTally {
                born_alive_and_alive: 2,
                later_died: 1,
                miscarriage_or_stillbirth: 1,
                born_dead_raw: 0,
            },
        );
        assert!(consistency_issues(&r, &resolved_cols()).is_empty());
    }

    #[test]
    fn test_mismatches_reported_in_fixed_order() {
        let r = row(
            WomanAggregate {
                children_alive: 2,
                children_dead: 3,
                miscarriages: 1,
                ..Default::default()
            },
            PregnancyTally::default(),
        );
        assert_eq!(
            consistency_issues(&r, &resolved_cols()),
            vec![
                Issue::AliveCountMismatch,
                Issue::MiscarriageMismatch,
                Issue::LaterDiedMismatch
            ]
        );
    }

    #[test]
    fn test_unresolved_column_skips_only_its_check() {
        let mut cols = resolved_cols();
        cols.miscarriages = None;
        let r = row(
            WomanAggregate {
                children_alive: 1,
                miscarriages: 5,
                ..Default::default()
            },
            PregnancyTally::default(),
        );
        // Miscarriage check skipped even though counts disagree
        assert_eq!(consistency_issues(&r, &cols), vec![Issue::AliveCountMismatch]);
    }

    #[test]
    fn test_stillbirth_counts_toward_miscarriage_check() {
        // Reported 3 miscarriages; derived 2 miscarriage + 1 born-dead = 3
        let r = row(
            WomanAggregate {
                miscarriages: 3,
                ..Default::default()
            },
            PregnancyTally {
                miscarriage_or_stillbirth: 3,
                born_dead_raw: 1,
                ..Default::default()
            },
        );
        assert!(consistency_issues(&r, &resolved_cols()).is_empty());
    }
}
