//! Algorithm implementations over genealogical person data

pub mod statistics;
