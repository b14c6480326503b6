//! Record normalization
//!
//! Converts raw rows (column name to string value) into typed
//! [`PersonRecord`]s. Parsing is lenient: a malformed value becomes an
//! absent date, an unknown id or an `Unknown` category, and the rest of the
//! row is still used.

use chrono::NaiveDate;
use indicatif::ProgressBar;
use log::debug;
use rustc_hash::FxHashMap;

use crate::config::ColumnConfig;
use crate::models::{PersonId, PersonRecord, RelationType, Sex};

/// A raw source row: column name to cell text
pub type RawRow = FxHashMap<String, String>;

/// Marker the genealogy export puts in front of uncertain dates
pub const UNCERTAIN_DATE_MARKER: &str = "N-";

/// Field order of a date column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    /// `yyyy-MM-dd`, used for marriage dates
    YearMonthDay,
    /// `dd-MM-yyyy`, used for birth and death dates
    DayMonthYear,
}

/// Whether `field` is non-empty and made of ASCII digits only
fn is_digits(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit())
}

/// A two-digit day or month
fn two_digits(field: &str) -> Option<u32> {
    if field.len() == 2 && is_digits(field) {
        field.parse().ok()
    } else {
        None
    }
}

/// A year of at least four digits
fn full_year(field: &str) -> Option<i32> {
    if field.len() >= 4 && is_digits(field) {
        field.parse().ok()
    } else {
        None
    }
}

impl DateOrder {
    /// Split `text` into `(year, month, day)` following this field order
    fn fields(self, text: &str) -> Option<(i32, u32, u32)> {
        let mut parts = text.split('-');
        let (first, second, third) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }
        match self {
            Self::YearMonthDay => Some((full_year(first)?, two_digits(second)?, two_digits(third)?)),
            Self::DayMonthYear => Some((full_year(third)?, two_digits(second)?, two_digits(first)?)),
        }
    }
}

/// Parse a date cell, returning `None` for anything that is not a valid date
///
/// Day and month are two digits and the year at least four. A day past the
/// end of its month (`31-02-1900`) is moved back to the month's last day;
/// days above 31 and months above 12 are rejected.
#[must_use]
pub fn parse_date(raw: Option<&str>, order: DateOrder) -> Option<NaiveDate> {
    let cleaned = raw?.trim().replace(UNCERTAIN_DATE_MARKER, "");
    if cleaned.is_empty() {
        return None;
    }
    let (year, month, day) = order.fields(&cleaned)?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| (28..day).rev().find_map(|d| NaiveDate::from_ymd_opt(year, month, d)))
}

/// Parse an id cell, returning `None` for empty or non-numeric values
#[must_use]
pub fn parse_id(raw: Option<&str>) -> Option<PersonId> {
    raw?.trim().parse::<u32>().ok().map(PersonId)
}

/// Convert one raw row into a person record
#[must_use]
pub fn normalize_row(row: &RawRow, columns: &ColumnConfig) -> PersonRecord {
    let cell = |name: &str| row.get(name).map(String::as_str);

    PersonRecord {
        birth_date: parse_date(cell(columns.birth_date.as_str()), DateOrder::DayMonthYear),
        marriage_date: parse_date(cell(columns.marriage_date.as_str()), DateOrder::YearMonthDay),
        death_date: parse_date(cell(columns.death_date.as_str()), DateOrder::DayMonthYear),
        relation_type: RelationType::from(cell(columns.relation_type.as_str())),
        sex: Sex::from(cell(columns.sex.as_str())),
        id: parse_id(cell(columns.id.as_str())),
        father_id: parse_id(cell(columns.father_id.as_str())),
        mother_id: parse_id(cell(columns.mother_id.as_str())),
        relation_id: parse_id(cell(columns.relation_id.as_str())),
        partner_id: parse_id(cell(columns.partner_id.as_str())),
    }
}

/// Convert raw rows into person records, preserving order
#[must_use]
pub fn normalize_rows(rows: &[RawRow], columns: &ColumnConfig) -> Vec<PersonRecord> {
    normalize_rows_with_progress(rows, columns, None)
}

/// Convert raw rows into person records, advancing `progress` per row
#[must_use]
pub fn normalize_rows_with_progress(
    rows: &[RawRow],
    columns: &ColumnConfig,
    progress: Option<&ProgressBar>,
) -> Vec<PersonRecord> {
    let records: Vec<PersonRecord> = rows
        .iter()
        .map(|row| {
            let record = normalize_row(row, columns);
            if let Some(pb) = progress {
                pb.inc(1);
            }
            record
        })
        .collect();

    debug!(
        "Normalized {} rows ({} with a birth date, {} with a marriage date, {} with a death date)",
        records.len(),
        records.iter().filter(|r| r.birth_date.is_some()).count(),
        records.iter().filter(|r| r.marriage_date.is_some()).count(),
        records.iter().filter(|r| r.death_date.is_some()).count(),
    );

    records
}
