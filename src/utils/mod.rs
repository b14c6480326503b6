//! Utility functions shared by the library and the command-line tool

pub mod progress;

pub use progress::{create_main_progress_bar, hidden_progress_bar};
