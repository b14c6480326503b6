//! Per-period statistics accumulator
//!
//! An `Accumulator` holds the running sums and counts of one bucket. The
//! aggregation driver feeds it facts through the `process_*` methods and
//! reads the result with [`Accumulator::finalize`], which never mutates
//! state and may be called more than once.

use chrono::NaiveDate;

use crate::algorithm::statistics::ledger::{Ledger, round_half_up};
use crate::algorithm::statistics::period::Period;
use crate::algorithm::statistics::report::Statistics;
use crate::models::{PersonId, RelationType, Sex};

/// Days in a year for age averages
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Running sum of day differences and the number of contributions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgeTally {
    /// Sum of all day differences
    pub total_days: i64,
    /// Number of contributions
    pub count: u32,
}

impl AgeTally {
    fn add(&mut self, days: i64) {
        self.total_days += days;
        self.count += 1;
    }

    fn merge(&mut self, other: Self) {
        self.total_days += other.total_days;
        self.count += other.count;
    }

    /// Average age in whole years, rounded half up; `None` without contributions
    #[must_use]
    pub fn average_years(&self) -> Option<i32> {
        if self.count == 0 {
            return None;
        }
        let years = self.total_days as f64 / f64::from(self.count) / DAYS_PER_YEAR;
        Some(round_half_up(years) as i32)
    }
}

/// Age tallies for both sexes together and for each sex separately
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SexTallies {
    /// Every contribution, whatever the sex
    pub both: AgeTally,
    /// Contributions of males
    pub male: AgeTally,
    /// Contributions of females
    pub female: AgeTally,
}

impl SexTallies {
    fn record(&mut self, days: i64, sex: Sex) {
        self.both.add(days);
        match sex {
            Sex::Male => self.male.add(days),
            Sex::Female => self.female.add(days),
            Sex::Unknown => {}
        }
    }

    fn merge(&mut self, other: Self) {
        self.both.merge(other.both);
        self.male.merge(other.male);
        self.female.merge(other.female);
    }
}

/// Aggregate state of one period bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accumulator {
    period: Period,
    marriage_age: SexTallies,
    death_age: SexTallies,
    births: u32,
    deaths: u32,
    ledger: Ledger,
}

impl Accumulator {
    /// Create an empty accumulator for a period
    #[must_use]
    pub fn new(period: Period) -> Self {
        Self {
            period,
            marriage_age: SexTallies::default(),
            death_age: SexTallies::default(),
            births: 0,
            deaths: 0,
            ledger: Ledger::new(),
        }
    }

    /// The period this accumulator covers
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    /// Age-at-marriage tallies
    #[must_use]
    pub const fn marriage_age(&self) -> &SexTallies {
        &self.marriage_age
    }

    /// Age-at-death tallies
    #[must_use]
    pub const fn death_age(&self) -> &SexTallies {
        &self.death_age
    }

    /// Number of births counted
    #[must_use]
    pub const fn births(&self) -> u32 {
        self.births
    }

    /// Number of deaths counted
    #[must_use]
    pub const fn deaths(&self) -> u32 {
        self.deaths
    }

    /// Couples and children registered in this bucket
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Count the age at marriage of a person
    ///
    /// Only marriages and registered partnerships with both dates known
    /// contribute.
    pub fn process_age_at_marriage(
        &mut self,
        birth_date: Option<NaiveDate>,
        marriage_date: Option<NaiveDate>,
        relation_type: RelationType,
        sex: Sex,
    ) {
        let (Some(birth), Some(marriage)) = (birth_date, marriage_date) else {
            return;
        };
        if !relation_type.is_marriage() {
            return;
        }
        self.marriage_age
            .record((marriage - birth).num_days(), sex);
    }

    /// Count the age at death of a person with both dates known
    pub fn process_age_at_death(
        &mut self,
        birth_date: Option<NaiveDate>,
        death_date: Option<NaiveDate>,
        sex: Sex,
    ) {
        if let (Some(birth), Some(death)) = (birth_date, death_date) {
            self.death_age.record((death - birth).num_days(), sex);
        }
    }

    /// Count a death if the date is known
    pub fn process_death(&mut self, death_date: Option<NaiveDate>) {
        if death_date.is_some() {
            self.deaths += 1;
        }
    }

    /// Count a birth if the date is known
    pub fn process_birth(&mut self, birth_date: Option<NaiveDate>) {
        if birth_date.is_some() {
            self.births += 1;
        }
    }

    /// Register the parent-child link and the couple described by a record
    ///
    /// The child is registered when its own id and both parent ids are
    /// known. The couple is registered when the own, relation and partner
    /// ids are known and the relation is a marriage or registered
    /// partnership.
    pub fn process_children_at_marriage(
        &mut self,
        id: Option<PersonId>,
        father_id: Option<PersonId>,
        mother_id: Option<PersonId>,
        relation_id: Option<PersonId>,
        partner_id: Option<PersonId>,
        relation_type: RelationType,
    ) {
        let Some(id) = id else {
            return;
        };

        if let (Some(father), Some(mother)) = (father_id, mother_id) {
            self.ledger.register_child(id, father, mother);
        }

        if let (Some(relation), Some(partner)) = (relation_id, partner_id) {
            if relation_type.is_marriage() {
                self.ledger.register_couple(relation, id, partner);
            }
        }
    }

    /// Reduce the accumulated state to reportable statistics
    #[must_use]
    pub fn finalize(&self) -> Statistics {
        Statistics {
            period: self.period,
            age_at_marriage_both: self.marriage_age.both.average_years(),
            age_at_marriage_male: self.marriage_age.male.average_years(),
            age_at_marriage_female: self.marriage_age.female.average_years(),
            age_at_death_both: self.death_age.both.average_years(),
            age_at_death_male: self.death_age.male.average_years(),
            age_at_death_female: self.death_age.female.average_years(),
            children_per_marriage: self.ledger.average_children(),
            deaths: self.deaths,
            births: self.births,
        }
    }

    /// Fold an accumulator of the same period, built from later records,
    /// into this one
    pub fn merge(&mut self, other: Self) {
        debug_assert_eq!(self.period, other.period);
        self.marriage_age.merge(other.marriage_age);
        self.death_age.merge(other.death_age);
        self.births += other.births;
        self.deaths += other.deaths;
        self.ledger.merge(other.ledger);
    }
}
