//! Thai-calendar date normalization.
//!
//! - month abbreviation table (`months`)
//! - date parsing + series construction (`normalize`)

pub mod months;
pub mod normalize;

pub use months::*;
pub use normalize::*;
