//! Arrow scalar extraction helpers.
//!
//! Survey exports are loosely typed: count columns arrive as integers,
//! floats, or text depending on the export revision, and date columns as
//! dates or strings. These helpers extract single values while applying the
//! crate's missing-data policy (missing or unparseable numerics coerce to
//! zero; unparseable dates drop to `None`).

use arrow::array::{
    Array, ArrayRef, Date32Array, Date64Array, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use chrono::NaiveDate;

/// Extract a string value from an Arrow array at the specified index, handling nulls
///
/// # Returns
/// `Some(String)` if the value exists and is not null, otherwise `None`
#[must_use]
pub fn string_at(array: &ArrayRef, index: usize) -> Option<String> {
    if index >= array.len() || array.is_null(index) {
        return None;
    }

    match array.data_type() {
        DataType::Utf8 => {
            let string_array = array.as_any().downcast_ref::<StringArray>()?;
            Some(string_array.value(index).to_string())
        }
        DataType::LargeUtf8 => {
            let string_array = array.as_any().downcast_ref::<LargeStringArray>()?;
            Some(string_array.value(index).to_string())
        }
        _ => None,
    }
}

/// Extract an integer count from an Arrow array, coercing missing data to zero
///
/// Nulls, NaN floats, and non-parseable text all coerce to 0: a structurally
/// absent count is treated as reported-zero.
#[must_use]
pub fn count_at(array: &ArrayRef, index: usize) -> i64 {
    if index >= array.len() || array.is_null(index) {
        return 0;
    }

    match array.data_type() {
        DataType::Int32 => array
            .as_any()
            .downcast_ref::<Int32Array>()
            .map_or(0, |a| i64::from(a.value(index))),
        DataType::Int64 => array
            .as_any()
            .downcast_ref::<Int64Array>()
            .map_or(0, |a| a.value(index)),
        DataType::Float32 => array
            .as_any()
            .downcast_ref::<Float32Array>()
            .map_or(0, |a| {
                let v = a.value(index);
                if v.is_nan() { 0 } else { v as i64 }
            }),
        DataType::Float64 => array
            .as_any()
            .downcast_ref::<Float64Array>()
            .map_or(0, |a| {
                let v = a.value(index);
                if v.is_nan() { 0 } else { v as i64 }
            }),
        DataType::Utf8 => array
            .as_any()
            .downcast_ref::<StringArray>()
            .and_then(|a| a.value(index).trim().parse::<i64>().ok())
            .unwrap_or(0),
        _ => 0,
    }
}

/// Extract a date value from an Arrow array at the specified index, handling nulls
///
/// String columns are tried against the date formats seen across export
/// revisions; an unparseable value yields `None`.
#[must_use]
pub fn date_at(array: &ArrayRef, index: usize) -> Option<NaiveDate> {
    if index >= array.len() || array.is_null(index) {
        return None;
    }

    match array.data_type() {
        DataType::Date32 => {
            let date_array = array.as_any().downcast_ref::<Date32Array>()?;
            date_array.value_as_date(index)
        }
        DataType::Date64 => {
            let date_array = array.as_any().downcast_ref::<Date64Array>()?;
            date_array.value_as_date(index)
        }
        DataType::Utf8 => {
            let string_array = array.as_any().downcast_ref::<StringArray>()?;
            let date_str = string_array.value(index);
            parse_date_str(date_str)
        }
        _ => None,
    }
}

/// Parse a date from text, trying the formats seen across export revisions
#[must_use]
pub fn parse_date_str(date_str: &str) -> Option<NaiveDate> {
    let trimmed = date_str.trim();

    // Timestamps like "2024-03-01T09:12:44.120+01:00" carry the day up front
    let day_part = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);

    for format in &["%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(day_part, format) {
            return Some(date);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_count_at_coercion() {
        let ints: ArrayRef = Arc::new(Int64Array::from(vec![Some(3), None]));
        assert_eq!(count_at(&ints, 0), 3);
        assert_eq!(count_at(&ints, 1), 0);
        assert_eq!(count_at(&ints, 99), 0);

        let floats: ArrayRef = Arc::new(Float64Array::from(vec![Some(2.0), Some(f64::NAN)]));
        assert_eq!(count_at(&floats, 0), 2);
        assert_eq!(count_at(&floats, 1), 0);

        let text: ArrayRef = Arc::new(StringArray::from(vec![" 4 ", "n/a"]));
        assert_eq!(count_at(&text, 0), 4);
        assert_eq!(count_at(&text, 1), 0);
    }

    #[test]
    fn test_parse_date_str_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(parse_date_str("2024-03-01"), Some(expected));
        assert_eq!(parse_date_str("01-03-2024"), Some(expected));
        assert_eq!(parse_date_str("2024-03-01T09:12:44.120+01:00"), Some(expected));
        assert_eq!(parse_date_str("first of march"), None);
    }
}
