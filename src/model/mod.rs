//! Domain model for QC report generation.
//!
//! The categorical enums mirror the answer levels of the survey export;
//! parsing is lenient because the export carries free-ish text and any
//! unrecognized value must degrade to `Unknown` rather than fail.

use serde::Serialize;

/// Number of independent QC checks a submission can fail
pub const TOTAL_CHECKS: u32 = 6;

/// Validation status of a household submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationStatus {
    /// Submission approved by a supervisor
    Approved,
    /// Submission rejected by a supervisor
    NotApproved,
    /// Validation has not concluded (default when the column is absent)
    Pending,
}

impl ValidationStatus {
    /// Convert to the display string used by the export
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::NotApproved => "Not Approved",
            Self::Pending => "Validation Ongoing",
        }
    }
}

impl From<Option<&str>> for ValidationStatus {
    fn from(s: Option<&str>) -> Self {
        match s.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("approved") => Self::Approved,
            Some(v) if v.eq_ignore_ascii_case("not approved") => Self::NotApproved,
            _ => Self::Pending,
        }
    }
}

/// Outcome of a recorded pregnancy event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthOutcome {
    /// Child was born alive
    BornAlive,
    /// Child was born dead (stillbirth)
    BornDead,
    /// Pregnancy ended in miscarriage or abortion
    MiscarriageOrAbortion,
    /// Missing or unrecognized outcome
    Unknown,
}

/// The "is the child currently alive" indicator, recorded independently
/// of the birth outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Survival {
    /// Child reported currently alive
    Yes,
    /// Child reported to have died
    No,
    /// Missing or unrecognized answer
    Unknown,
}

/// A single QC defect flag attached to a submission.
///
/// Variant order is the display order: the three internal-consistency
/// checks first, then the three duplicate checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Issue {
    /// Reported children-alive count disagrees with derived born-alive count
    AliveCountMismatch,
    /// Reported miscarriage count disagrees with derived miscarriage/stillbirth count
    MiscarriageMismatch,
    /// Reported children-died count disagrees with derived later-died count
    LaterDiedMismatch,
    /// Household shares its unique code with another household
    DuplicateHousehold,
    /// A woman row shares its mother id with another woman row
    DuplicateMother,
    /// A pregnancy row shares its child id with another pregnancy row
    DuplicateChild,
}

impl Issue {
    /// Display label, verbatim from the supervisor-facing report
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AliveCountMismatch => "Born Alive mismatch",
            Self::MiscarriageMismatch => "Miscarrage mismatch",
            Self::LaterDiedMismatch => "Born Alive but Later Died mismatch",
            Self::DuplicateHousehold => "Duplicate Household",
            Self::DuplicateMother => "Duplicate Mother",
            Self::DuplicateChild => "Duplicate Child",
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final per-submission QC report row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QcRecord {
    /// Submission identifier joining the three relations
    pub submission_uuid: String,
    /// Enumerator who collected the household, when the name column resolved
    pub enumerator: Option<String>,
    /// Failed checks in display order
    pub issues: Vec<Issue>,
    /// Submission participates in a household-code collision
    pub duplicate_household: bool,
    /// Submission owns a woman row in a mother-id collision
    pub duplicate_mother: bool,
    /// Submission owns a pregnancy row in a child-id collision
    pub duplicate_child: bool,
}

impl QcRecord {
    /// Number of failed checks (0..=6)
    #[must_use]
    pub fn flag_count(&self) -> u32 {
        self.issues.len() as u32
    }

    /// Share of the six checks that failed, as a percentage
    #[must_use]
    pub fn error_percentage(&self) -> f64 {
        f64::from(self.flag_count()) / f64::from(TOTAL_CHECKS) * 100.0
    }

    /// Semicolon-joined issue labels, or the `"No Errors"` sentinel
    #[must_use]
    pub fn issue_string(&self) -> String {
        if self.issues.is_empty() {
            "No Errors".to_string()
        } else {
            itertools::Itertools::join(&mut self.issues.iter().map(Issue::as_str), "; ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_status_parsing() {
        assert_eq!(ValidationStatus::from(Some("Approved")), ValidationStatus::Approved);
        assert_eq!(ValidationStatus::from(Some("not approved")), ValidationStatus::NotApproved);
        assert_eq!(ValidationStatus::from(Some("anything else")), ValidationStatus::Pending);
        assert_eq!(ValidationStatus::from(None), ValidationStatus::Pending);
    }

    #[test]
    fn test_issue_string_sentinel() {
        let record = QcRecord {
            submission_uuid: "u1".to_string(),
            enumerator: None,
            issues: vec![],
            duplicate_household: false,
            duplicate_mother: false,
            duplicate_child: false,
        };
        assert_eq!(record.issue_string(), "No Errors");
        assert_eq!(record.flag_count(), 0);
        assert!((record.error_percentage() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_issue_string_joined() {
        let record = QcRecord {
            submission_uuid: "u1".to_string(),
            enumerator: Some("Amina".to_string()),
            issues: vec![Issue::AliveCountMismatch, Issue::DuplicateHousehold],
            duplicate_household: true,
            duplicate_mother: false,
            duplicate_child: false,
        };
        assert_eq!(
            record.issue_string(),
            "Born Alive mismatch; Duplicate Household"
        );
        assert_eq!(record.flag_count(), 2);
        let expected = 2.0 / 6.0 * 100.0;
        assert!((record.error_percentage() - expected).abs() < f64::EPSILON);
    }
}
