//! A Rust library for QC reconciliation of household mortality survey
//! exports: joins the household, woman, and pregnancy-history sheets by
//! submission identifier, compares self-reported counts against counts
//! derived from detail rows, and flags inconsistencies and duplicate
//! records for field supervisors.

pub mod aggregate;
pub mod config;
pub mod duplicates;
pub mod engine;
pub mod error;
pub mod filter;
pub mod loader;
pub mod locations;
pub mod model;
pub mod reconcile;
pub mod report;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::QcConfig;
pub use engine::QcEngine;
pub use error::{QcError, Result};
pub use model::{Issue, QcRecord, ValidationStatus};
pub use report::{CoverageSummary, QcReport, QcSummary};

// Arrow types
pub use arrow::record_batch::RecordBatch;

// Schema resolution
pub use schema::{HouseholdColumns, PregnancyColumns, WomanColumns, find_column};

// Pre-processing and shell-side helpers
pub use filter::{HouseholdFilter, submission_ids};
pub use loader::{SurveySnapshot, load_survey_snapshot};
pub use locations::{LocationLookup, LocationRecord, translate_community_codes};
