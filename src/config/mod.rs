//! Configuration for loading and aggregating person records.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};

/// Year range and interval used to bucket facts into periods
///
/// Binning is disabled when either bound is below 1; every fact then lands
/// in the default bucket. An interval of zero or less yields a single
/// bucket spanning `year_from..=year_to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinningConfig {
    /// First year of the bucketed range (inclusive)
    pub year_from: i32,
    /// Last year of the bucketed range (inclusive)
    pub year_to: i32,
    /// Width of each bucket in years
    pub interval: i32,
}

impl BinningConfig {
    /// Lower bound used when only an interval is given
    pub const FULL_RANGE_FROM: i32 = 1;
    /// Upper bound used when only an interval is given
    pub const FULL_RANGE_TO: i32 = 3000;

    /// Binning over an explicit year range
    #[must_use]
    pub const fn new(year_from: i32, year_to: i32, interval: i32) -> Self {
        Self {
            year_from,
            year_to,
            interval,
        }
    }

    /// No binning: every fact lands in the default bucket
    #[must_use]
    pub const fn disabled() -> Self {
        Self::new(0, 0, 0)
    }

    /// Binning by interval over the full supported year range
    #[must_use]
    pub const fn by_interval(interval: i32) -> Self {
        Self::new(Self::FULL_RANGE_FROM, Self::FULL_RANGE_TO, interval)
    }

    /// Whether dates are bucketed at all
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.year_from >= 1 && self.year_to >= 1
    }
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

impl fmt::Display for BinningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_enabled() {
            return write!(f, "no period binning");
        }
        write!(f, "years {} to {}", self.year_from, self.year_to)?;
        if self.interval > 0 {
            write!(f, " in steps of {}", self.interval)?;
        }
        Ok(())
    }
}

/// Names of the source columns holding each person field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Marriage date column (`yyyy-MM-dd`)
    pub marriage_date: String,
    /// Birth date column (`dd-MM-yyyy`)
    pub birth_date: String,
    /// Death date column (`dd-MM-yyyy`)
    pub death_date: String,
    /// Relation type column
    pub relation_type: String,
    /// Sex column
    pub sex: String,
    /// Own id column
    pub id: String,
    /// Father id column
    pub father_id: String,
    /// Mother id column
    pub mother_id: String,
    /// Relation id column
    pub relation_id: String,
    /// Partner id column
    pub partner_id: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            marriage_date: "datum".to_string(),
            birth_date: "Geboorte".to_string(),
            death_date: "Overlijden".to_string(),
            relation_type: "huw.type".to_string(),
            sex: "Geslacht".to_string(),
            id: "Intern_nummer".to_string(),
            father_id: "ID_vader".to_string(),
            mother_id: "ID_moeder".to_string(),
            relation_id: "RelatieID".to_string(),
            partner_id: "PartnerID".to_string(),
        }
    }
}

impl ColumnConfig {
    const FIELD_NAMES: [&'static str; 10] = [
        "marriage_date",
        "birth_date",
        "death_date",
        "relation_type",
        "sex",
        "id",
        "father_id",
        "mother_id",
        "relation_id",
        "partner_id",
    ];

    /// Load a column mapping from a JSON file
    ///
    /// Keys missing from the file keep their default column name.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let columns: Self = serde_json::from_reader(BufReader::new(file))?;
        columns.validate()?;
        Ok(columns)
    }

    /// Check that every field maps to a non-blank column name
    pub fn validate(&self) -> Result<()> {
        if let Some(position) = self
            .column_names()
            .iter()
            .position(|name| name.trim().is_empty())
        {
            return Err(StatsError::config(format!(
                "column mapping entry {} is blank",
                Self::FIELD_NAMES[position]
            )));
        }
        Ok(())
    }

    /// All configured column names
    #[must_use]
    pub fn column_names(&self) -> [&str; 10] {
        [
            self.marriage_date.as_str(),
            self.birth_date.as_str(),
            self.death_date.as_str(),
            self.relation_type.as_str(),
            self.sex.as_str(),
            self.id.as_str(),
            self.father_id.as_str(),
            self.mother_id.as_str(),
            self.relation_id.as_str(),
            self.partner_id.as_str(),
        ]
    }
}

/// Options for reading raw rows from a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceConfig {
    /// Field separator of CSV exports
    pub delimiter: u8,
    /// Number of rows decoded per record batch
    pub batch_size: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            batch_size: 8192,
        }
    }
}
