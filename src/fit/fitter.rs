//! Polynomial trend fitting over a date window.
//!
//! Given:
//! - a canonical time series
//! - a value column
//! - a degree (1 or 2)
//! - an optional inclusive date range
//!
//! we regress the column on the date ordinal with ordinary least squares and
//! evaluate the fitted polynomial back at every observed date.

use nalgebra::{DMatrix, DVector};
use tracing::info;

use crate::domain::{
    DateRange, Degree, FitQuality, TimeSeries, TrendFit, TrendModel, ValueColumn, column_points, date_ordinal,
};
use crate::error::FitError;
use crate::fit::stats::summarize;
use crate::math::{Standardization, solve_least_squares, to_raw_basis};
use crate::models::fill_design_row;

/// Least-squares polynomial on a raw abscissa.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyFit {
    pub degree: Degree,
    /// Raw-basis coefficients, lowest power first.
    pub coefficients: Vec<f64>,
    pub standardization: Standardization,
    /// Coefficients in the standardized basis.
    pub local: Vec<f64>,
}

/// Fit `y ≈ Σ c_k x^k` for `k = 0..=degree`.
///
/// Requires at least `degree + 1` distinct abscissas; fewer is reported as
/// [`FitError::InsufficientData`] instead of being handed to the solver.
/// `xs` and `ys` must be the same length.
pub fn fit_polynomial(xs: &[f64], ys: &[f64], degree: Degree) -> Result<PolyFit, FitError> {
    if xs.len() != ys.len() {
        return Err(FitError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }

    let required = degree.coefficient_len();
    let available = distinct_count(xs);
    if available < required {
        return Err(FitError::InsufficientData {
            degree,
            required,
            available,
        });
    }

    let std = Standardization::from_samples(xs);
    let n = xs.len();
    let p = degree.coefficient_len();

    let mut design = DMatrix::<f64>::zeros(n, p);
    let mut row = vec![0.0; p];
    for (i, &x) in xs.iter().enumerate() {
        fill_design_row(degree, std.apply(x), &mut row);
        for (j, &v) in row.iter().enumerate() {
            design[(i, j)] = v;
        }
    }
    let y = DVector::from_column_slice(ys);

    let beta = solve_least_squares(&design, &y).ok_or(FitError::Singular { degree })?;
    let local: Vec<f64> = beta.iter().copied().collect();

    Ok(PolyFit {
        degree,
        coefficients: to_raw_basis(&local, std),
        standardization: std,
        local,
    })
}

/// Fit a trend of `column` over `series`, optionally restricted to `range`.
pub fn fit(
    series: &TimeSeries,
    column: ValueColumn,
    degree: Degree,
    range: Option<DateRange>,
) -> Result<TrendFit, FitError> {
    if series.is_empty() {
        return Err(FitError::NoData);
    }

    let view = series.view(range);
    if view.is_empty() {
        return Err(match range {
            Some(r) => FitError::EmptyRange {
                start: r.start,
                end: r.end,
            },
            None => FitError::NoData,
        });
    }

    let points = column_points(view, column);
    let ys: Vec<f64> = points.iter().map(|p| p.value).collect();
    let stats = summarize(&ys).ok_or(FitError::NoValues { column })?;
    let xs: Vec<f64> = points.iter().map(|p| f64::from(date_ordinal(p.date))).collect();

    let poly = fit_polynomial(&xs, &ys, degree)?;

    // Points are date-ordered, so the ends are the domain.
    let (first, last) = match (points.first(), points.last()) {
        (Some(a), Some(b)) => (a.date, b.date),
        _ => return Err(FitError::NoValues { column }),
    };

    let model = TrendModel {
        degree,
        coefficients: poly.coefficients,
        domain: DateRange::new(first, last),
        center: poly.standardization.center,
        scale: poly.standardization.scale,
        local: poly.local,
    };

    let curve: Vec<f64> = xs.iter().map(|&x| model.predict_ordinal(x)).collect();
    let quality = fit_quality(&ys, &curve);

    info!(
        column = %column,
        degree = %degree,
        n = points.len(),
        rmse = quality.rmse,
        "fitted trend"
    );

    Ok(TrendFit {
        column,
        points,
        curve,
        model,
        stats,
        quality,
    })
}

fn fit_quality(observed: &[f64], fitted: &[f64]) -> FitQuality {
    let sse: f64 = observed
        .iter()
        .zip(fitted)
        .map(|(y, f)| (y - f) * (y - f))
        .sum();
    let n = observed.len();
    let rmse = if n > 0 { (sse / n as f64).sqrt() } else { 0.0 };
    FitQuality { sse, rmse, n }
}

fn distinct_count(xs: &[f64]) -> usize {
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}
