//! Summary statistics over raw column values.

use crate::domain::SummaryStats;

/// Mean/max/min of `values`; `None` for an empty slice.
///
/// Absent rather than zero so an empty window never reads as a real price.
pub fn summarize(values: &[f64]) -> Option<SummaryStats> {
    if values.is_empty() {
        return None;
    }
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    let mut sum = 0.0;
    for &v in values {
        max = max.max(v);
        min = min.min(v);
        sum += v;
    }
    Some(SummaryStats {
        count: values.len(),
        mean: sum / values.len() as f64,
        max,
        min,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_stats() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn stats_basic() {
        let s = summarize(&[4.0, 1.0, 7.0]).unwrap();
        assert_eq!(s.count, 3);
        assert_eq!(s.mean, 4.0);
        assert_eq!(s.max, 7.0);
        assert_eq!(s.min, 1.0);
    }
}
