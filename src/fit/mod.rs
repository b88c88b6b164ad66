//! Trend fitting.
//!
//! Responsibilities:
//!
//! - select the date window and value column
//! - fit the polynomial by least squares
//! - compute summary statistics over the raw values

pub mod fitter;
pub mod stats;

pub use fitter::*;
pub use stats::*;
