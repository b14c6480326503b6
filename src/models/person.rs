//! Person record model
//!
//! A `PersonRecord` is one normalized row of the genealogy export. Every
//! field is optional or falls back to an `Unknown` variant; malformed
//! source values never prevent a record from being built.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::types::{RelationType, Sex};

/// Identifier of a person (or relation) in the source data
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PersonId(pub u32);

impl From<u32> for PersonId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A normalized person record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersonRecord {
    /// Birth date
    pub birth_date: Option<NaiveDate>,
    /// Date of the marriage (or relation) this row describes
    pub marriage_date: Option<NaiveDate>,
    /// Death date
    pub death_date: Option<NaiveDate>,
    /// Kind of relation this row describes
    pub relation_type: RelationType,
    /// Sex of the person
    pub sex: Sex,
    /// The person's own id
    pub id: Option<PersonId>,
    /// Id of the father
    pub father_id: Option<PersonId>,
    /// Id of the mother
    pub mother_id: Option<PersonId>,
    /// Id of the relation this row describes
    pub relation_id: Option<PersonId>,
    /// Id of the partner in that relation
    pub partner_id: Option<PersonId>,
}

impl PersonRecord {
    /// Create an empty record for the given person id
    #[must_use]
    pub fn new(id: impl Into<PersonId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Set the birth date
    #[must_use]
    pub fn with_birth_date(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    /// Set the death date
    #[must_use]
    pub fn with_death_date(mut self, date: NaiveDate) -> Self {
        self.death_date = Some(date);
        self
    }

    /// Set the sex
    #[must_use]
    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = sex;
        self
    }

    /// Set both parent ids
    #[must_use]
    pub fn with_parents(mut self, father: impl Into<PersonId>, mother: impl Into<PersonId>) -> Self {
        self.father_id = Some(father.into());
        self.mother_id = Some(mother.into());
        self
    }

    /// Describe the relation this row belongs to
    #[must_use]
    pub fn with_relation(
        mut self,
        relation_type: RelationType,
        relation_id: impl Into<PersonId>,
        partner_id: impl Into<PersonId>,
        marriage_date: Option<NaiveDate>,
    ) -> Self {
        self.relation_type = relation_type;
        self.relation_id = Some(relation_id.into());
        self.partner_id = Some(partner_id.into());
        self.marriage_date = marriage_date;
        self
    }
}
