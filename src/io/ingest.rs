//! CSV ingest.
//!
//! This module is responsible for turning a CSV export of the daily price
//! sheet into `RawRecord`s. It does not interpret dates; that is the
//! normalizer's job.
//!
//! Sheet shape (fixed, by position):
//!
//! ```text
//! date, open, high, low, average, close, change, change%, volume, value, SET index, SET change%
//! ```
//!
//! Design goals:
//! - **Strict shape** for the header row (clear errors + exit code 2)
//! - **Row-level validation** (skip short rows, but report what happened)
//! - **Separation of concerns**: no date parsing or fitting here

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{info, warn};

use crate::domain::RawRecord;
use crate::error::AppError;

/// Number of columns in the sheet.
pub const SHEET_COLUMNS: usize = 12;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: raw records + row errors.
#[derive(Debug, Clone, Default)]
pub struct IngestedData {
    pub records: Vec<RawRecord>,
    pub header: Vec<String>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load raw records from a CSV file.
pub fn load_records(path: &Path, skip_rows: usize) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    let data = read_records(file, skip_rows)?;
    info!(
        path = %path.display(),
        rows = data.rows_read,
        errors = data.row_errors.len(),
        "loaded price sheet"
    );
    Ok(data)
}

/// Read raw records from any CSV source.
///
/// The first `skip_rows` records are title rows; the next one is the header.
pub fn read_records<R: Read>(source: R, skip_rows: usize) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut records = reader.records().enumerate();

    for _ in 0..skip_rows {
        if records.next().is_none() {
            return Err(AppError::new(2, "CSV ended before the header row."));
        }
    }

    let header = match records.next() {
        Some((_, Ok(h))) => h,
        Some((_, Err(e))) => return Err(AppError::new(2, format!("Failed to read CSV header: {e}"))),
        None => return Err(AppError::new(2, "CSV has no header row.")),
    };
    if header.len() < SHEET_COLUMNS {
        return Err(AppError::new(
            2,
            format!(
                "Expected {SHEET_COLUMNS} columns (date + 11 values), header has {}.",
                header.len()
            ),
        ));
    }
    let header: Vec<String> = header.iter().map(normalize_header_name).collect();

    let mut data = IngestedData {
        header,
        ..IngestedData::default()
    };

    for (idx, result) in records {
        // CSV is 1-based line numbers.
        let line = idx + 1;
        data.rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(line, error = %e, "skipping unreadable CSV row");
                data.row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record) {
            Ok(row) => data.records.push(row),
            Err(message) => {
                warn!(line, %message, "skipping CSV row");
                data.row_errors.push(RowError { line, message });
            }
        }
    }

    Ok(data)
}

fn normalize_header_name(name: &str) -> String {
    // Excel emits UTF-8 CSVs with a BOM prefix on the first header.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn parse_row(record: &StringRecord) -> Result<RawRecord, String> {
    if record.len() < SHEET_COLUMNS {
        return Err(format!(
            "Expected {SHEET_COLUMNS} fields, found {}.",
            record.len()
        ));
    }
    let num = |i: usize| parse_number(record.get(i));

    Ok(RawRecord {
        date: record.get(0).unwrap_or_default().to_string(),
        open: num(1),
        high: num(2),
        low: num(3),
        average: num(4),
        close: num(5),
        change: num(6),
        change_pct: num(7),
        volume: num(8),
        value: num(9),
        set_index: num(10),
        set_change_pct: num(11),
    })
}

/// Parse a sheet number (`1,234.50`, `-0.25`); blanks and `-` are absent.
pub fn parse_number(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    let v = s.replace(',', "").parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
ข้อมูลราคาย้อนหลัง CPF,,,,,,,,,,,
วันที่,ราคาเปิด,ราคาสูงสุด,ราคาต่ำสุด,ราคาเฉลี่ย,ราคาปิด,เปลี่ยนแปลง,เปลี่ยนแปลง(%),ปริมาณ(พันหุ้น),มูลค่า(ล้านบาท),SET Index,SET เปลี่ยนแปลง(%)
2 ม.ค. 2567,24.10,24.40,24.00,24.21,24.30,0.20,0.83,\"12,345.60\",298.87,\"1,415.85\",0.02
3 ม.ค. 2567,24.30,24.50,24.10,24.30,24.20,-0.10,-0.41,\"9,876.00\",239.98,\"1,403.41\",-0.88
short,row
";

    #[test]
    fn reads_sheet_after_title_rows() {
        let data = read_records(SHEET.as_bytes(), 1).unwrap();
        assert_eq!(data.header.len(), SHEET_COLUMNS);
        assert_eq!(data.header[5], "ราคาปิด");
        assert_eq!(data.rows_read, 3);
        assert_eq!(data.records.len(), 2);
        assert_eq!(data.row_errors.len(), 1);

        let first = &data.records[0];
        assert_eq!(first.date, "2 ม.ค. 2567");
        assert_eq!(first.close, Some(24.30));
        assert_eq!(first.volume, Some(12_345.60));
        assert_eq!(first.set_index, Some(1_415.85));
        assert_eq!(data.records[1].change, Some(-0.10));
    }

    #[test]
    fn short_header_is_rejected() {
        let err = read_records("a,b,c\n".as_bytes(), 0).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn bom_is_stripped_from_header() {
        let csv = "\u{feff}date,1,2,3,4,5,6,7,8,9,10,11\n";
        let data = read_records(csv.as_bytes(), 0).unwrap();
        assert_eq!(data.header[0], "date");
        assert!(data.records.is_empty());
    }

    #[test]
    fn numbers_tolerate_separators_and_dashes() {
        assert_eq!(parse_number(Some("1,234.5")), Some(1234.5));
        assert_eq!(parse_number(Some(" -0.25 ")), Some(-0.25));
        assert_eq!(parse_number(Some("-")), None);
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(Some("n/a")), None);
        assert_eq!(parse_number(None), None);
    }
}
