//! Domain models for genealogical person data
//!
//! This module contains the typed person record and the categorical
//! enumerations the source data encodes as strings.

pub mod person;
pub mod types;

pub use person::{PersonId, PersonRecord};
pub use types::{RelationType, Sex};
