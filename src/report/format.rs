//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the normalization/fitting code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::app::pipeline::RunOutput;
use crate::calendar::format_thai_date;
use crate::domain::{SummaryStats, TrendFit, ValueColumn};
use crate::error::FitError;

/// Format the full run summary (input accounting + window + stats + trend).
pub fn format_run_summary(run: &RunOutput, column: ValueColumn) -> String {
    let mut out = String::new();

    out.push_str("=== trend - Polynomial Price Trend ===\n");
    out.push_str(&format!(
        "Input: rows={} | unreadable={} | dated={} | dropped={} (undatable)\n",
        run.ingest.rows_read,
        run.ingest.row_errors.len(),
        run.normalized.series.len(),
        run.normalized.dropped.len(),
    ));

    if let (Some(first), Some(last)) = (run.normalized.series.first_date(), run.normalized.series.last_date()) {
        out.push_str(&format!(
            "Series: {first} .. {last} ({} .. {})\n",
            format_thai_date(first),
            format_thai_date(last)
        ));
    }

    out.push_str(&format!("Column: {} ({})\n", column.label(), column.display_name()));
    match run.range {
        Some(range) => out.push_str(&format!("Window: {range} ({} entries)\n", run.view_len)),
        None => out.push_str(&format!("Window: all ({} entries)\n", run.view_len)),
    }

    out.push_str(&format_stats(run.stats.as_ref()));

    match &run.trend {
        Ok(fit) => out.push_str(&format_trend(fit)),
        Err(err) => out.push_str(&format!("Trend: unavailable - {}\n", describe_fit_error(err))),
    }

    out
}

/// One line of summary statistics, or a placeholder when the view is empty.
pub fn format_stats(stats: Option<&SummaryStats>) -> String {
    match stats {
        Some(s) => format!(
            "Stats: n={} | mean={:.4} | max={:.4} | min={:.4}\n",
            s.count, s.mean, s.max, s.min
        ),
        None => "Stats: n/a (no values in window)\n".to_string(),
    }
}

fn format_trend(fit: &TrendFit) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Trend: degree {} | {} .. {} | RMSE={:.4}\n",
        fit.model.degree, fit.model.domain.start, fit.model.domain.end, fit.quality.rmse
    ));
    out.push_str(&format!("- coefficients: {}\n", fmt_vec(&fit.model.coefficients)));
    out.push_str(&format!(
        "- slope at {}: {:+.6} per day\n",
        fit.model.domain.end,
        fit.model.slope(fit.model.domain.end)
    ));
    out
}

/// User-facing wording for each fit failure.
pub fn describe_fit_error(err: &FitError) -> String {
    match err {
        FitError::NoData => "nothing could be dated in the input".to_string(),
        FitError::EmptyRange { start, end } => format!("no data in range {start} .. {end}"),
        FitError::NoValues { column } => format!("column {} has no values in the window", column.display_name()),
        FitError::InsufficientData {
            degree,
            required,
            available,
        } => format!(
            "insufficient data for degree {degree} (needs {required} distinct dates, window has {available})"
        ),
        FitError::LengthMismatch { xs, ys } => format!("fit input mismatch ({xs} dates, {ys} values)"),
        FitError::Singular { .. } => "least-squares solve failed".to_string(),
    }
}

/// Table of the fitted view: date, Thai date, observed, trend, residual.
pub fn format_table(fit: &TrendFit) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<10} {:<14} {:>12} {:>12} {:>12}\n",
            "date", "thai_date", "value", "trend", "residual"
        )
        .trim_end(),
    );
    out.push('\n');

    out.push_str(format!("{:-<10} {:-<14} {:-<12} {:-<12} {:-<12}\n", "", "", "", "", "").trim_end());
    out.push('\n');

    for (p, y_fit) in fit.points.iter().zip(&fit.curve) {
        out.push_str(&format!(
            "{:<10} {:<14} {:>12.4} {:>12.4} {:>12.4}\n",
            p.date,
            pad_chars(&format_thai_date(p.date), 14),
            p.value,
            y_fit,
            p.value - y_fit,
        ));
    }

    out
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6e}")).collect();
    format!("[{}]", parts.join(", "))
}

/// Left-align by character count.
///
/// Thai combining vowels make `{:<N}` padding look short in a terminal, but
/// char count is still closer than byte length.
fn pad_chars(s: &str, width: usize) -> String {
    let n = s.chars().count();
    if n >= width {
        return s.to_string();
    }
    format!("{s}{}", " ".repeat(width - n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::{CalendarEntry, Degree, RawRecord, TimeSeries};
    use crate::fit::fit;

    fn sample_fit() -> TrendFit {
        let entries = (1..=4)
            .map(|d| CalendarEntry {
                date: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
                record: RawRecord::with_close("", f64::from(d)),
            })
            .collect();
        fit(&TimeSeries::from_entries(entries), ValueColumn::Close, Degree::Linear, None).unwrap()
    }

    #[test]
    fn table_has_header_rule_and_rows() {
        let table = format_table(&sample_fit());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2 + 4);
        assert!(lines[0].starts_with("date"));
        assert!(lines[2].starts_with("2024-01-01 1 ม.ค. 2567"));
    }

    #[test]
    fn missing_stats_are_not_zero() {
        assert_eq!(format_stats(None), "Stats: n/a (no values in window)\n");
    }

    #[test]
    fn fit_errors_read_differently() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let messages = [
            describe_fit_error(&FitError::NoData),
            describe_fit_error(&FitError::EmptyRange { start: d, end: d }),
            describe_fit_error(&FitError::InsufficientData {
                degree: Degree::Quadratic,
                required: 3,
                available: 1,
            }),
        ];
        assert!(messages[0].contains("nothing could be dated"));
        assert!(messages[1].starts_with("no data in range"));
        assert!(messages[2].contains("needs 3"));
    }
}
