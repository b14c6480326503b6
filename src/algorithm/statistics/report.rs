//! Statistics results and report rendering

use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::algorithm::statistics::period::Period;

/// Separator printed between the reports of consecutive periods
pub const REPORT_SEPARATOR: &str = "--------------------------------";

/// Demographic statistics of one period
///
/// Averages are `None` when no record qualified for them in this period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// The period these statistics cover
    pub period: Period,
    /// Average age at marriage in years, both sexes
    pub age_at_marriage_both: Option<i32>,
    /// Average age at marriage in years, males
    pub age_at_marriage_male: Option<i32>,
    /// Average age at marriage in years, females
    pub age_at_marriage_female: Option<i32>,
    /// Average age at death in years, both sexes
    pub age_at_death_both: Option<i32>,
    /// Average age at death in years, males
    pub age_at_death_male: Option<i32>,
    /// Average age at death in years, females
    pub age_at_death_female: Option<i32>,
    /// Average number of children per married couple
    pub children_per_marriage: Option<u32>,
    /// Number of deaths
    pub deaths: u32,
    /// Number of births
    pub births: u32,
}

struct Average<T>(Option<T>);

impl<T: fmt::Display> fmt::Display for Average<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => write!(f, "{value}"),
            None => write!(f, "n/a"),
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Period: {}", self.period)?;
        writeln!(
            f,
            "Average age when married (all): {} years",
            Average(self.age_at_marriage_both)
        )?;
        writeln!(
            f,
            "Average age when married (male): {} years",
            Average(self.age_at_marriage_male)
        )?;
        writeln!(
            f,
            "Average age when married (female): {} years",
            Average(self.age_at_marriage_female)
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "Average age when deceased (all): {} years",
            Average(self.age_at_death_both)
        )?;
        writeln!(
            f,
            "Average age when deceased (male): {} years",
            Average(self.age_at_death_male)
        )?;
        writeln!(
            f,
            "Average age when deceased (female): {} years",
            Average(self.age_at_death_female)
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "Average number of children (married couples): {}",
            Average(self.children_per_marriage)
        )?;
        writeln!(f, "Deaths: {}", self.deaths)?;
        write!(f, "Births: {}", self.births)
    }
}

/// Render the reports of several periods, separated by a rule
#[must_use]
pub fn generate_summary(stats: &[Statistics]) -> String {
    let mut summary = stats
        .iter()
        .map(|s| format!("{s}\n{REPORT_SEPARATOR}"))
        .join("\n");

    let births: u64 = stats.iter().map(|s| u64::from(s.births)).sum();
    let deaths: u64 = stats.iter().map(|s| u64::from(s.deaths)).sum();
    if !summary.is_empty() {
        summary.push('\n');
    }
    summary.push_str(&format!(
        "{} period(s), {births} births, {deaths} deaths in total\n",
        stats.len()
    ));
    summary
}
