//! Read/write trend JSON files.
//!
//! Trend JSON is the "portable" representation of a fit:
//! - model (degree, raw and standardized coefficients, domain)
//! - summary statistics and fit quality
//! - observed points and the fitted curve, for re-plotting
//!
//! The schema is defined by `domain::TrendFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{TrendFile, TrendFit};
use crate::error::AppError;

impl TrendFile {
    pub fn from_fit(fit: &TrendFit) -> Self {
        TrendFile {
            tool: "trend".to_string(),
            column: fit.column,
            column_label: fit.column.label().to_string(),
            model: fit.model.clone(),
            stats: fit.stats,
            quality: fit.quality,
            points: fit.points.clone(),
            curve: fit.curve.clone(),
        }
    }
}

/// Write a trend JSON file.
pub fn write_trend_json(path: &Path, fit: &TrendFit) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create trend JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &TrendFile::from_fit(fit))
        .map_err(|e| AppError::new(4, format!("Failed to write trend JSON: {e}")))?;

    Ok(())
}

/// Read a trend JSON file.
pub fn read_trend_json(path: &Path) -> Result<TrendFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open trend JSON '{}': {e}", path.display())))?;
    let trend: TrendFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid trend JSON: {e}")))?;
    if trend.points.len() != trend.curve.len() {
        return Err(AppError::new(2, "Invalid trend JSON: points and curve differ in length."));
    }
    Ok(trend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::{CalendarEntry, Degree, RawRecord, TimeSeries, ValueColumn};
    use crate::fit::fit;

    #[test]
    fn trend_file_survives_json() {
        let entries = (1..=5)
            .map(|d| CalendarEntry {
                date: NaiveDate::from_ymd_opt(2024, 3, d).unwrap(),
                record: RawRecord::with_close("", f64::from(d) * 1.5),
            })
            .collect();
        let series = TimeSeries::from_entries(entries);
        let fit = fit(&series, ValueColumn::Close, Degree::Linear, None).unwrap();

        let json = serde_json::to_string(&TrendFile::from_fit(&fit)).unwrap();
        let back: TrendFile = serde_json::from_str(&json).unwrap();

        assert_eq!(back.column, ValueColumn::Close);
        assert_eq!(back.model.degree, Degree::Linear);
        assert_eq!(back.points, fit.points);
        let d = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert!((back.model.predict(d) - 6.0).abs() < 1e-9);
    }
}
