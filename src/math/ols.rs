//! Ordinary least squares solver.
//!
//! We solve small regression problems of the form:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - SVD, so tall design matrices (more rows than columns) are handled
//!   directly. Nalgebra's `QR::solve` is intended for square systems.
//! - The parameter dimension is at most 3, so SVD cost is negligible next to
//!   parsing the input.

use nalgebra::{DMatrix, DVector};

/// Singular values at or below this are treated as zero.
const SVD_EPS: f64 = 1e-10;

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is rank-deficient or produces non-finite
/// coefficients.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);
    if svd.rank(SVD_EPS) < x.ncols() {
        return None;
    }
    let beta = svd.solve(y, SVD_EPS).ok()?;
    beta.iter().all(|v| v.is_finite()).then_some(beta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn rank_deficient_system_is_rejected() {
        // Two identical abscissas cannot determine a slope.
        let x = DMatrix::from_row_slice(2, 2, &[1.0, 4.0, 1.0, 4.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0]);
        assert!(solve_least_squares(&x, &y).is_none());
    }
}
