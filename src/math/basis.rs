//! Polynomial basis on a standardized abscissa.
//!
//! Date ordinals are around `7.4e5`, so the raw basis `{1, x, x²}` spans
//! eleven orders of magnitude and the design matrix is badly conditioned.
//! We fit on `u = (x - center) / scale` (which maps the sample span onto
//! `[-1, 1]`) and convert coefficients back to the raw basis for reporting.

/// Affine map from raw abscissa to the fitting abscissa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standardization {
    pub center: f64,
    pub scale: f64,
}

impl Standardization {
    /// Midpoint/half-range of `xs`. A zero span falls back to unit scale.
    pub fn from_samples(xs: &[f64]) -> Self {
        let (min, max) = xs
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
        if !(min.is_finite() && max.is_finite()) {
            return Self { center: 0.0, scale: 1.0 };
        }
        let half = (max - min) / 2.0;
        Self {
            center: min + half,
            scale: if half > 0.0 { half } else { 1.0 },
        }
    }

    pub fn apply(&self, x: f64) -> f64 {
        (x - self.center) / self.scale
    }
}

/// Fill `out` with `1, u, u², …` (its length sets the number of terms).
pub fn fill_powers(u: f64, out: &mut [f64]) {
    let mut p = 1.0;
    for slot in out.iter_mut() {
        *slot = p;
        p *= u;
    }
}

/// Evaluate `Σ c_k u^k` (Horner).
pub fn eval_poly(coeffs: &[f64], u: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * u + c)
}

/// Re-express coefficients of `u = (x - c) / s` as coefficients of `x`.
///
/// Uses the binomial expansion of `((x - c) / s)^k`.
pub fn to_raw_basis(local: &[f64], std: Standardization) -> Vec<f64> {
    let n = local.len();
    let mut raw = vec![0.0; n];
    for (k, &a) in local.iter().enumerate() {
        let scale_k = std.scale.powi(k as i32);
        let mut binom = 1.0;
        for j in 0..=k {
            // term: a * C(k, j) * x^j * (-c)^(k-j) / s^k
            raw[j] += a * binom * (-std.center).powi((k - j) as i32) / scale_k;
            binom = binom * (k - j) as f64 / (j + 1) as f64;
        }
    }
    raw
}
