//! Synthetic price sheet generation.
//!
//! Produces a sheet shaped like the exchange's historical-price export:
//! newest row first, Thai-calendar dates, and a configurable share of rows
//! whose date is deliberately broken so the drop policy has something to do.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::calendar::format_thai_date;
use crate::domain::{RawRecord, ValueColumn};
use crate::error::AppError;
use crate::io::export::UTF8_BOM;

/// Parameters for a synthetic sheet.
#[derive(Debug, Clone)]
pub struct SampleSpec {
    pub symbol: String,
    pub start: NaiveDate,
    /// Number of trading days (weekends are skipped).
    pub days: usize,
    pub start_price: f64,
    /// Mean daily log return.
    pub drift: f64,
    /// Daily log-return standard deviation.
    pub volatility: f64,
    /// Probability that a row gets an unparseable date.
    pub bad_date_share: f64,
    pub seed: u64,
}

/// Generate raw rows, newest first.
pub fn generate_sheet(spec: &SampleSpec) -> Result<Vec<RawRecord>, AppError> {
    if spec.days == 0 {
        return Err(AppError::new(2, "Sample day count must be > 0."));
    }
    if !(spec.start_price.is_finite() && spec.start_price > 0.0) {
        return Err(AppError::new(2, "Sample start price must be finite and > 0."));
    }
    if !(0.0..1.0).contains(&spec.bad_date_share) {
        return Err(AppError::new(2, "Bad-date share must be in [0, 1)."));
    }

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let returns = Normal::<f64>::new(spec.drift, spec.volatility)
        .map_err(|e| AppError::new(2, format!("Invalid sample volatility: {e}")))?;
    let unit = Normal::<f64>::new(0.0, 1.0).map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let mut rows = Vec::with_capacity(spec.days);
    let mut date = spec.start;
    let mut prev_close = spec.start_price;
    let mut index = 1_400.0_f64;

    for _ in 0..spec.days {
        while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            date += Duration::days(1);
        }

        let open = round2(prev_close);
        let close = round2(prev_close * returns.sample(&mut rng).exp()).max(0.01);
        let spread = unit.sample(&mut rng).abs() * spec.volatility * 0.5;
        let high = round2(open.max(close) * (1.0 + spread));
        let low = round2(open.min(close) * (1.0 - spread)).max(0.01);
        let average = round2((high + low + close) / 3.0);
        let change = round2(close - prev_close);
        let volume = round2(rng.gen_range(5_000.0..50_000.0));
        let prev_index = index;
        index *= (unit.sample(&mut rng) * 0.008).exp();

        let text = if rng.gen_bool(spec.bad_date_share) {
            broken_date(date, &mut rng)
        } else {
            format_thai_date(date)
        };

        rows.push(RawRecord {
            date: text,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            average: Some(average),
            close: Some(close),
            change: Some(change),
            change_pct: Some(round2(change / prev_close * 100.0)),
            volume: Some(volume),
            value: Some(round2(volume * average / 1_000.0)),
            set_index: Some(round2(index)),
            set_change_pct: Some(round2((index / prev_index - 1.0) * 100.0)),
        });

        prev_close = close;
        date += Duration::days(1);
    }

    rows.reverse();
    Ok(rows)
}

/// Write rows as a sheet CSV (title row, Thai header, data).
pub fn write_sheet_csv(path: &Path, symbol: &str, rows: &[RawRecord]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create sample CSV '{}': {e}", path.display())))?;
    file.write_all(UTF8_BOM)
        .map_err(|e| AppError::new(4, format!("Failed to write sample CSV: {e}")))?;

    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(file);
    let err = |e: csv::Error| AppError::new(4, format!("Failed to write sample CSV: {e}"));

    writer.write_record([format!("ราคาย้อนหลัง {symbol}")]).map_err(err)?;

    let mut header = vec!["วันที่".to_string()];
    header.extend(ValueColumn::ALL.iter().map(|c| c.label().to_string()));
    writer.write_record(&header).map_err(err)?;

    for row in rows {
        let mut fields = vec![row.date.clone()];
        fields.extend(
            ValueColumn::ALL
                .iter()
                .map(|c| c.get(row).map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string())),
        );
        writer.write_record(&fields).map_err(err)?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush sample CSV: {e}")))
}

fn broken_date(date: NaiveDate, rng: &mut StdRng) -> String {
    let year = date.year() + crate::calendar::BUDDHIST_ERA_OFFSET;
    match rng.gen_range(0..4) {
        0 => format!("{} บ.ค. {year}", date.day()),
        1 => format!("31 ก.พ. {year}"),
        2 => format!("{}-{:02}-{year}", date.day(), date.month()),
        _ => String::new(),
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
