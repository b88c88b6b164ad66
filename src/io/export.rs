//! Export the column-selected view to CSV.
//!
//! The export is meant to open cleanly in Excel with Thai headers intact, so
//! it is UTF-8 with a BOM prefix.

use std::fs;
use std::path::Path;

use crate::domain::{SeriesPoint, ValueColumn};
use crate::error::AppError;

/// UTF-8 byte order mark.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Render `date,<column label>` rows as BOM-prefixed CSV bytes.
pub fn render_column_csv(points: &[SeriesPoint], column: ValueColumn) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(UTF8_BOM.to_vec());

    writer
        .write_record(["date", column.label()])
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV header: {e}")))?;

    for p in points {
        writer
            .write_record([p.date.to_string(), p.value.to_string()])
            .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::new(4, format!("Failed to flush export CSV: {e}")))
}

/// Write pre-rendered CSV bytes to `path`.
pub fn write_export(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    fs::write(path, bytes)
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn points() -> Vec<SeriesPoint> {
        [(2, 24.3), (3, 24.2), (4, 24.55)]
            .iter()
            .map(|&(d, v)| SeriesPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
                value: v,
            })
            .collect()
    }

    #[test]
    fn export_has_bom_header_and_one_line_per_point() {
        let bytes = render_column_csv(&points(), ValueColumn::Close).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "date,ราคาปิด");
        assert_eq!(lines[1], "2024-01-02,24.3");
    }

    #[test]
    fn export_reparses_to_same_points() {
        let original = points();
        let bytes = render_column_csv(&original, ValueColumn::Close).unwrap();

        let mut reader = csv::Reader::from_reader(&bytes[UTF8_BOM.len()..]);
        let parsed: Vec<SeriesPoint> = reader
            .records()
            .map(|r| {
                let r = r.unwrap();
                SeriesPoint {
                    date: r[0].parse().unwrap(),
                    value: r[1].parse().unwrap(),
                }
            })
            .collect();
        assert_eq!(parsed, original);
    }
}
