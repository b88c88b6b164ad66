//! Input/output helpers.
//!
//! - CSV ingest of the price sheet (`ingest`)
//! - column CSV export (`export`)
//! - trend JSON read/write (`trend`)
//! - synthetic sheet generation (`sample`)

pub mod export;
pub mod ingest;
pub mod sample;
pub mod trend;

pub use export::*;
pub use ingest::*;
pub use sample::*;
pub use trend::*;
