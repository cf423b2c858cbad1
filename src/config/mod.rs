//! Configuration for the QC engine.
//!
//! Survey tool releases rename and reorder columns, so every semantically
//! important column is located by a keyword rather than a fixed name. The
//! keywords and the categorical answer strings live here so a new export
//! revision only needs a config change, never a code change.

/// Configuration for QC report generation
#[derive(Debug, Clone)]
pub struct QcConfig {
    /// Keyword locating the birth-outcome column in the pregnancy sheet
    pub outcome_keyword: String,
    /// Keyword locating the still-alive column in the pregnancy sheet
    pub still_alive_keyword: String,
    /// Keyword locating the children-currently-alive count column
    pub children_alive_keyword: String,
    /// Keyword locating the children-who-died count column
    pub children_dead_keyword: String,
    /// Keyword locating the miscarriage/abortion count column
    pub miscarriage_keyword: String,
    /// Keyword locating the sons-who-died count column
    pub sons_dead_keyword: String,
    /// Keyword locating the daughters-who-died count column
    pub daughters_dead_keyword: String,
    /// Keyword locating the enumerator name column in the household sheet
    pub enumerator_keyword: String,
    /// Keyword locating the unique household code column
    pub unique_code_keyword: String,
    /// Keyword locating the consent date column
    pub consent_date_keyword: String,
    /// Keywords locating the location hierarchy columns (LGA, ward, community)
    pub lga_keyword: String,
    /// Keyword for the ward column
    pub ward_keyword: String,
    /// Keyword for the community column
    pub community_keyword: String,
    /// Keyword locating the validation status column
    pub validation_status_keyword: String,
    /// Fallback name of the submission id column in the household sheet
    pub household_uuid_column: String,
    /// Fallback name of the submission id foreign key in the detail sheets
    pub submission_uuid_column: String,
    /// Name of the per-woman identifier column
    pub mother_id_column: String,
    /// Name of the per-child identifier column
    pub child_id_column: String,
    /// Name of the submission timestamp column
    pub start_column: String,
    /// Categorical answer meaning "born alive"
    pub born_alive_level: String,
    /// Categorical answer meaning "born dead"
    pub born_dead_level: String,
    /// Categorical answer meaning "miscarriage or abortion"
    pub miscarriage_level: String,
    /// Still-alive answer meaning yes
    pub alive_yes_level: String,
    /// Still-alive answer meaning no
    pub alive_no_level: String,
    /// Validation status text meaning "not approved"
    pub not_approved_level: String,
    /// Drop not-approved households before report generation
    pub exclude_not_approved: bool,
}

impl Default for QcConfig {
    fn default() -> Self {
        // Keywords mirror the production export's question wording, including
        // its misspelling of "miscarriage".
        Self {
            outcome_keyword: "Was the baby born alive".to_string(),
            still_alive_keyword: "still alive".to_string(),
            children_alive_keyword: "c_alive".to_string(),
            children_dead_keyword: "c_dead".to_string(),
            miscarriage_keyword: "misscarraige".to_string(),
            sons_dead_keyword: "boys have died".to_string(),
            daughters_dead_keyword: "daughters have died".to_string(),
            enumerator_keyword: "Type in your Name".to_string(),
            unique_code_keyword: "unique_code".to_string(),
            consent_date_keyword: "consent_date".to_string(),
            lga_keyword: "Confirm your LGA".to_string(),
            ward_keyword: "Confirm your ward".to_string(),
            community_keyword: "Confirm your community".to_string(),
            validation_status_keyword: "_validation_status".to_string(),
            household_uuid_column: "_uuid".to_string(),
            submission_uuid_column: "_submission__uuid".to_string(),
            mother_id_column: "mother_id".to_string(),
            child_id_column: "child_id".to_string(),
            start_column: "start".to_string(),
            born_alive_level: "Born Alive".to_string(),
            born_dead_level: "Born dead".to_string(),
            miscarriage_level: "Miscarriage and Abortion".to_string(),
            alive_yes_level: "Yes".to_string(),
            alive_no_level: "No".to_string(),
            not_approved_level: "Not Approved".to_string(),
            exclude_not_approved: true,
        }
    }
}
