//! Location code lookup.
//!
//! Some export revisions carry coded community values instead of display
//! names. A static lookup table (LGA, ward, community, code) translates
//! codes to names before the engine runs; unknown codes pass through
//! untouched so a partially covered table never loses rows.

use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::Result;
use crate::schema::HouseholdColumns;
use crate::utils::string_at;

/// One row of the location lookup table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocationRecord {
    /// LGA display name
    pub lga: String,
    /// Ward display name
    pub ward: String,
    /// Community display name
    pub community: String,
    /// Code used for the community in coded exports
    pub code: String,
}

/// Code-to-name lookup built from the static location table
#[derive(Debug, Clone, Default)]
pub struct LocationLookup {
    by_code: FxHashMap<String, LocationRecord>,
}

impl LocationLookup {
    /// Build a lookup from location records; later duplicates of a code win
    #[must_use]
    pub fn from_records(records: Vec<LocationRecord>) -> Self {
        let by_code = records
            .into_iter()
            .map(|r| (r.code.clone(), r))
            .collect();
        Self { by_code }
    }

    /// Parse the lookup from its JSON representation (a list of records)
    ///
    /// # Errors
    /// Returns an error when the JSON is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<LocationRecord> = serde_json::from_str(json)
            .map_err(|e| crate::error::QcError::Schema(format!("invalid location table: {e}")))?;
        Ok(Self::from_records(records))
    }

    /// Look up the full location record for a community code
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&LocationRecord> {
        self.by_code.get(code)
    }

    /// Display name for a community code, if the code is known
    #[must_use]
    pub fn community_name(&self, code: &str) -> Option<&str> {
        self.by_code.get(code).map(|r| r.community.as_str())
    }
}

/// Rewrite coded community values in the household sheet to display names
///
/// Values without a lookup entry (including already-translated names) pass
/// through unchanged. When the community column never resolved or is not a
/// string column, the batch is returned as-is.
pub fn translate_community_codes(
    batch: &RecordBatch,
    cols: &HouseholdColumns,
    lookup: &LocationLookup,
) -> Result<RecordBatch> {
    let Some(name) = cols.community.as_deref() else {
        return Ok(batch.clone());
    };
    let Ok(index) = batch.schema().index_of(name) else {
        return Ok(batch.clone());
    };
    let column = batch.column(index);
    if column.as_any().downcast_ref::<StringArray>().is_none() {
        return Ok(batch.clone());
    }

    let translated: StringArray = (0..batch.num_rows())
        .map(|row| {
            string_at(column, row).map(|value| {
                lookup
                    .community_name(value.trim())
                    .map_or(value.clone(), str::to_string)
            })
        })
        .collect();

    let mut columns: Vec<ArrayRef> = batch.columns().to_vec();
    columns[index] = Arc::new(translated);
    Ok(RecordBatch::try_new(batch.schema(), columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_from_json() {
        let json = r#"[
            {"lga": "Gumel", "ward": "Central", "community": "Dantanoma", "code": "C-014"},
            {"lga": "Gumel", "ward": "Central", "community": "Zango", "code": "C-015"}
        ]"#;
        let lookup = LocationLookup::from_json_str(json).unwrap();
        assert_eq!(lookup.community_name("C-014"), Some("Dantanoma"));
        assert_eq!(lookup.community_name("C-099"), None);
        assert_eq!(lookup.get("C-015").unwrap().lga, "Gumel");
    }

    #[test]
    fn test_malformed_table_is_error() {
        assert!(LocationLookup::from_json_str("not json").is_err());
    }
}
