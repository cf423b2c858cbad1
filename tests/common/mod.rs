//! Shared fixtures: in-memory survey sheets with realistic export column
//! names, so tests exercise the keyword resolver the same way a real
//! workbook does.

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// One household row: (uuid, enumerator, lga, ward, community, unique_code, start, validation_status)
pub type HouseholdRow<'a> = (
    &'a str,
    &'a str,
    &'a str,
    &'a str,
    &'a str,
    Option<&'a str>,
    &'a str,
    Option<&'a str>,
);

fn string_column(values: Vec<Option<&str>>) -> ArrayRef {
    Arc::new(StringArray::from(values))
}

#[must_use]
pub fn household_batch(rows: &[HouseholdRow]) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("start", DataType::Utf8, true),
        Field::new("_uuid", DataType::Utf8, false),
        Field::new("intro/Type in your Name", DataType::Utf8, true),
        Field::new("location/Confirm your LGA", DataType::Utf8, true),
        Field::new("location/Confirm your ward", DataType::Utf8, true),
        Field::new("location/Confirm your community", DataType::Utf8, true),
        Field::new("household/unique_code", DataType::Utf8, true),
        Field::new("consent/consent_date", DataType::Utf8, true),
        Field::new("_validation_status", DataType::Utf8, true),
    ]));
    let columns = vec![
        string_column(rows.iter().map(|r| Some(r.6)).collect()),
        string_column(rows.iter().map(|r| Some(r.0)).collect()),
        string_column(rows.iter().map(|r| Some(r.1)).collect()),
        string_column(rows.iter().map(|r| Some(r.2)).collect()),
        string_column(rows.iter().map(|r| Some(r.3)).collect()),
        string_column(rows.iter().map(|r| Some(r.4)).collect()),
        string_column(rows.iter().map(|r| r.5).collect()),
        string_column(rows.iter().map(|r| Some(r.6)).collect()),
        string_column(rows.iter().map(|r| r.7).collect()),
    ];
    RecordBatch::try_new(schema, columns).unwrap()
}

/// One woman row: (submission uuid, mother_id, c_alive, c_dead, miscarriages, boys_died, girls_died)
pub type WomanRow<'a> = (&'a str, &'a str, i64, i64, i64, i64, i64);

#[must_use]
pub fn women_batch(rows: &[WomanRow]) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("_submission__uuid", DataType::Utf8, false),
        Field::new("mother_id", DataType::Utf8, true),
        Field::new("women/c_alive", DataType::Int64, true),
        Field::new("women/c_dead", DataType::Int64, true),
        Field::new("women/misscarraige", DataType::Int64, true),
        Field::new("women/How many of your boys have died", DataType::Int64, true),
        Field::new("women/How many of your daughters have died", DataType::Int64, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        string_column(rows.iter().map(|r| Some(r.0)).collect()),
        string_column(rows.iter().map(|r| Some(r.1)).collect()),
        Arc::new(Int64Array::from(rows.iter().map(|r| r.2).collect::<Vec<_>>())),
        Arc::new(Int64Array::from(rows.iter().map(|r| r.3).collect::<Vec<_>>())),
        Arc::new(Int64Array::from(rows.iter().map(|r| r.4).collect::<Vec<_>>())),
        Arc::new(Int64Array::from(rows.iter().map(|r| r.5).collect::<Vec<_>>())),
        Arc::new(Int64Array::from(rows.iter().map(|r| r.6).collect::<Vec<_>>())),
    ];
    RecordBatch::try_new(schema, columns).unwrap()
}

/// One pregnancy row: (submission uuid, child_id, outcome, still_alive)
pub type PregnancyRow<'a> = (&'a str, &'a str, Option<&'a str>, Option<&'a str>);

#[must_use]
pub fn pregnancies_batch(rows: &[PregnancyRow]) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("_submission__uuid", DataType::Utf8, false),
        Field::new("child_id", DataType::Utf8, true),
        Field::new(
            "pregnancy/Was the baby born alive or born dead?",
            DataType::Utf8,
            true,
        ),
        Field::new("pregnancy/Is the child still alive?", DataType::Utf8, true),
    ]));
    let columns = vec![
        string_column(rows.iter().map(|r| Some(r.0)).collect()),
        string_column(rows.iter().map(|r| Some(r.1)).collect()),
        string_column(rows.iter().map(|r| r.2).collect()),
        string_column(rows.iter().map(|r| r.3).collect()),
    ];
    RecordBatch::try_new(schema, columns).unwrap()
}

/// A household row with defaults filled in, pending validation
#[must_use]
pub fn plain_household<'a>(uuid: &'a str, code: Option<&'static str>) -> HouseholdRow<'a> {
    (
        uuid,
        "Amina Bello",
        "Gumel",
        "Central",
        "Dantanoma",
        code,
        "2024-03-01T09:12:44.120+01:00",
        None,
    )
}
