//! Categorical domain types
//!
//! The genealogy export encodes relation types and sexes as fixed Dutch
//! strings. Each type here is a closed set with an explicit `Unknown`
//! variant, so lookups never fail.

use std::fmt;

use serde::Serialize;

/// Kind of relationship a person record describes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum RelationType {
    /// Announced marriage (banns)
    PreMarriage,
    /// Marriage
    Marriage,
    /// Notarially registered partnership
    RegisteredPartnership,
    /// Cohabitation
    LivingTogether,
    /// Unspecified relationship
    Relationship,
    /// Relationship of an unknown form
    UnknownRelationship,
    /// No relationship
    Single,
    /// Missing or unrecognised value
    #[default]
    Unknown,
}

impl RelationType {
    /// All variants, in declaration order
    pub const ALL: [Self; 8] = [
        Self::PreMarriage,
        Self::Marriage,
        Self::RegisteredPartnership,
        Self::LivingTogether,
        Self::Relationship,
        Self::UnknownRelationship,
        Self::Single,
        Self::Unknown,
    ];

    /// The string this variant is written as in the source data
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreMarriage => "Ondertrouw",
            Self::Marriage => "Huwelijk",
            Self::RegisteredPartnership => "Notarieel",
            Self::LivingTogether => "Samenleven",
            Self::Relationship => "Relatie",
            Self::UnknownRelationship => "Onbekende relatievorm",
            Self::Single => "Geen relatie",
            Self::Unknown => "Onbekend",
        }
    }

    /// Whether this relation counts as a marriage for marriage statistics
    #[must_use]
    pub const fn is_marriage(self) -> bool {
        matches!(self, Self::Marriage | Self::RegisteredPartnership)
    }
}

impl From<&str> for RelationType {
    fn from(s: &str) -> Self {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str() == s)
            .unwrap_or(Self::Unknown)
    }
}

impl From<Option<&str>> for RelationType {
    fn from(s: Option<&str>) -> Self {
        s.map_or(Self::Unknown, Self::from)
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sex of an individual
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Sex {
    /// Male
    Male,
    /// Female
    Female,
    /// Unknown or not specified
    #[default]
    Unknown,
}

impl Sex {
    /// The string this variant is written as in the source data
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "V",
            Self::Unknown => "?",
        }
    }
}

impl From<&str> for Sex {
    fn from(s: &str) -> Self {
        match s.trim() {
            "M" => Self::Male,
            "V" => Self::Female,
            _ => Self::Unknown,
        }
    }
}

impl From<Option<&str>> for Sex {
    fn from(s: Option<&str>) -> Self {
        s.map_or(Self::Unknown, Self::from)
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
