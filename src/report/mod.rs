//! Reporting utilities: run summary, tables, and error wording.

pub mod format;

pub use format::*;
