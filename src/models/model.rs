//! Polynomial trend evaluation.
//!
//! The fitter relies on two primitive operations:
//! - build a design row for a given (standardized) ordinal
//! - predict y at a date given a fitted model

use chrono::NaiveDate;

use crate::domain::{Degree, TrendModel, date_ordinal};
use crate::math::{Standardization, eval_poly, fill_powers};

/// Fill a design row `1, u (, u²)` for the given degree.
///
/// # Panics
/// Panics if `out` is shorter than `degree.coefficient_len()`.
pub fn fill_design_row(degree: Degree, u: f64, out: &mut [f64]) {
    fill_powers(u, &mut out[..degree.coefficient_len()]);
}

impl TrendModel {
    fn standardization(&self) -> Standardization {
        Standardization {
            center: self.center,
            scale: self.scale,
        }
    }

    /// Evaluate the trend at a raw ordinal.
    pub fn predict_ordinal(&self, x: f64) -> f64 {
        eval_poly(&self.local, self.standardization().apply(x))
    }

    /// Evaluate the trend at a date.
    pub fn predict(&self, date: NaiveDate) -> f64 {
        self.predict_ordinal(f64::from(date_ordinal(date)))
    }

    /// Slope of the trend per day at `date`.
    pub fn slope(&self, date: NaiveDate) -> f64 {
        let x = f64::from(date_ordinal(date));
        self.coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(k, c)| k as f64 * c * x.powi(k as i32 - 1))
            .sum()
    }
}
