//! Calendar-year periods used as bucket keys

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::config::BinningConfig;

/// An inclusive range of calendar years, or the unbounded default bucket
///
/// Periods order lexicographically by `(from, to)`; `Unbounded` sorts
/// before every year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Period {
    /// No date filtering, or a date outside the configured range
    Unbounded,
    /// Years `from..=to`
    Years {
        /// First year (inclusive)
        from: i32,
        /// Last year (inclusive)
        to: i32,
    },
}

impl Period {
    /// A year range; the bounds are swapped if given in reverse
    #[must_use]
    pub fn years(from: i32, to: i32) -> Self {
        Self::Years {
            from: from.min(to),
            to: from.max(to),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => write!(f, "all years"),
            Self::Years { from, to } => write!(f, "{from} to {to}"),
        }
    }
}

/// Determine the period a fact dated `date` belongs to
///
/// Absent dates, disabled binning and years outside
/// `year_from..=year_to` all map to [`Period::Unbounded`]. With a positive
/// interval, windows are aligned to `year_from` and the last one is clipped
/// to `year_to`.
#[must_use]
pub fn route_period(date: Option<NaiveDate>, binning: &BinningConfig) -> Period {
    let Some(date) = date else {
        return Period::Unbounded;
    };
    let year = date.year();

    if !binning.is_enabled() || year < binning.year_from || year > binning.year_to {
        return Period::Unbounded;
    }

    if binning.interval <= 0 {
        return Period::Years {
            from: binning.year_from,
            to: binning.year_to,
        };
    }

    let start = year - (year - binning.year_from) % binning.interval;
    let end = start
        .saturating_add(binning.interval - 1)
        .min(binning.year_to);
    Period::Years {
        from: start,
        to: end,
    }
}
