//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw sheet rows and the value-column enumeration (`RawRecord`, `ValueColumn`)
//! - dated entries and the canonical series (`CalendarEntry`, `TimeSeries`)
//! - fit outputs (`TrendModel`, `TrendFit`, `SummaryStats`)

pub mod series;
pub mod types;

pub use series::*;
pub use types::*;
