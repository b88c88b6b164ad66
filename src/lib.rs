//! `price-trend` library crate.
//!
//! The binary (`trend`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the normalizer and fitter are reusable from other front-ends
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cache;
pub mod calendar;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
