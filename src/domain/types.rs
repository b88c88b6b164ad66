//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during normalization and fitting
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::fmt;
use std::path::PathBuf;

use chrono::{Months, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One of the eleven numeric columns of the daily price sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ValueColumn {
    Open,
    High,
    Low,
    Average,
    Close,
    Change,
    ChangePct,
    /// Traded volume, thousands of shares.
    Volume,
    /// Traded value, millions of baht.
    Value,
    SetIndex,
    SetChangePct,
}

impl ValueColumn {
    /// Sheet order (left to right, after the date column).
    pub const ALL: [ValueColumn; 11] = [
        ValueColumn::Open,
        ValueColumn::High,
        ValueColumn::Low,
        ValueColumn::Average,
        ValueColumn::Close,
        ValueColumn::Change,
        ValueColumn::ChangePct,
        ValueColumn::Volume,
        ValueColumn::Value,
        ValueColumn::SetIndex,
        ValueColumn::SetChangePct,
    ];

    /// Header label as it appears in the source sheet.
    pub fn label(self) -> &'static str {
        match self {
            ValueColumn::Open => "ราคาเปิด",
            ValueColumn::High => "ราคาสูงสุด",
            ValueColumn::Low => "ราคาต่ำสุด",
            ValueColumn::Average => "ราคาเฉลี่ย",
            ValueColumn::Close => "ราคาปิด",
            ValueColumn::Change => "เปลี่ยนแปลง",
            ValueColumn::ChangePct => "เปลี่ยนแปลง(%)",
            ValueColumn::Volume => "ปริมาณ(พันหุ้น)",
            ValueColumn::Value => "มูลค่า(ล้านบาท)",
            ValueColumn::SetIndex => "SET Index",
            ValueColumn::SetChangePct => "SET เปลี่ยนแปลง(%)",
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ValueColumn::Open => "Open",
            ValueColumn::High => "High",
            ValueColumn::Low => "Low",
            ValueColumn::Average => "Average",
            ValueColumn::Close => "Close",
            ValueColumn::Change => "Change",
            ValueColumn::ChangePct => "Change (%)",
            ValueColumn::Volume => "Volume (k shares)",
            ValueColumn::Value => "Value (M THB)",
            ValueColumn::SetIndex => "SET Index",
            ValueColumn::SetChangePct => "SET Change (%)",
        }
    }

    /// Project this column out of a raw record.
    pub fn get(self, record: &RawRecord) -> Option<f64> {
        match self {
            ValueColumn::Open => record.open,
            ValueColumn::High => record.high,
            ValueColumn::Low => record.low,
            ValueColumn::Average => record.average,
            ValueColumn::Close => record.close,
            ValueColumn::Change => record.change,
            ValueColumn::ChangePct => record.change_pct,
            ValueColumn::Volume => record.volume,
            ValueColumn::Value => record.value,
            ValueColumn::SetIndex => record.set_index,
            ValueColumn::SetChangePct => record.set_change_pct,
        }
    }
}

impl fmt::Display for ValueColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(v) => f.write_str(v.get_name()),
            None => f.write_str(self.display_name()),
        }
    }
}

/// Polynomial degree of the trend model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(into = "u8", try_from = "u8")]
pub enum Degree {
    #[value(name = "1")]
    Linear,
    #[value(name = "2")]
    Quadratic,
}

impl Degree {
    pub fn as_usize(self) -> usize {
        match self {
            Degree::Linear => 1,
            Degree::Quadratic => 2,
        }
    }

    /// Number of polynomial coefficients (`degree + 1`).
    ///
    /// This is also the minimum number of distinct dates a fit needs.
    pub fn coefficient_len(self) -> usize {
        self.as_usize() + 1
    }
}

impl From<Degree> for u8 {
    fn from(value: Degree) -> Self {
        match value {
            Degree::Linear => 1,
            Degree::Quadratic => 2,
        }
    }
}

impl TryFrom<u8> for Degree {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Degree::Linear),
            2 => Ok(Degree::Quadratic),
            other => Err(format!("unsupported trend degree {other} (expected 1 or 2)")),
        }
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_usize())
    }
}

/// A raw row of the price sheet.
///
/// Numeric cells are optional: the sheet uses blanks or `-` for values that do
/// not apply (e.g. the change on a listing day).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub date: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub average: Option<f64>,
    pub close: Option<f64>,
    pub change: Option<f64>,
    pub change_pct: Option<f64>,
    pub volume: Option<f64>,
    pub value: Option<f64>,
    pub set_index: Option<f64>,
    pub set_change_pct: Option<f64>,
}

impl RawRecord {
    /// A record carrying only a date string and a closing price.
    pub fn with_close(date: impl Into<String>, close: f64) -> Self {
        Self {
            date: date.into(),
            close: Some(close),
            ..Self::default()
        }
    }
}

/// A successfully dated row.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEntry {
    pub date: NaiveDate,
    pub record: RawRecord,
}

impl CalendarEntry {
    pub fn value(&self, column: ValueColumn) -> Option<f64> {
        column.get(&self.record).filter(|v| v.is_finite())
    }
}

/// Proleptic Gregorian ordinal of a date (0001-01-01 is day 1).
pub fn date_ordinal(date: NaiveDate) -> i32 {
    chrono::Datelike::num_days_from_ce(&date)
}

/// An inclusive date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

/// A dated value of the selected column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Mean/max/min of the selected column over a view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub n: usize,
}

/// Fitted polynomial trend.
///
/// `coefficients` are in the raw-ordinal power basis, lowest power first:
/// `y = c0 + c1·x (+ c2·x²)` with `x` the date ordinal.
///
/// The solver works on `u = (x - center) / scale`; `local` holds the
/// coefficients in that basis and is what `predict` evaluates, since raw
/// ordinals are large enough that `x²` loses precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendModel {
    pub degree: Degree,
    pub coefficients: Vec<f64>,
    pub domain: DateRange,
    pub center: f64,
    pub scale: f64,
    pub local: Vec<f64>,
}

/// Output of a single fit request.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendFit {
    pub column: ValueColumn,
    /// The observed points the model was fitted to, in series order.
    pub points: Vec<SeriesPoint>,
    /// Model evaluated at each point's ordinal; aligned with `points`.
    pub curve: Vec<f64>,
    pub model: TrendModel,
    pub stats: SummaryStats,
    pub quality: FitQuality,
}

/// How the user selected the date window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeSpec {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Trailing window ending at `to` (or the last date of the series).
    pub last_months: Option<u32>,
}

impl RangeSpec {
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none() && self.last_months.is_none()
    }

    /// Resolve against the series domain `[first, last]`.
    ///
    /// Returns `None` when no bound was requested (use the whole series).
    /// A single bound outside the domain may resolve to `start > end`,
    /// which selects nothing.
    pub fn resolve(&self, first: NaiveDate, last: NaiveDate) -> Option<DateRange> {
        if self.is_unbounded() {
            return None;
        }
        let end = self.to.unwrap_or(last);
        let start = match (self.from, self.last_months) {
            (Some(from), _) => from,
            (None, Some(months)) => end.checked_sub_months(Months::new(months)).unwrap_or(first),
            (None, None) => first,
        };
        Some(DateRange::new(start, end))
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub input: PathBuf,
    /// Title rows preceding the header row.
    pub skip_rows: usize,
    pub column: ValueColumn,
    pub degree: Degree,
    pub range: RangeSpec,
    pub show_table: bool,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_csv: Option<PathBuf>,
    pub export_trend: Option<PathBuf>,
}

/// A saved trend file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendFile {
    pub tool: String,
    pub column: ValueColumn,
    pub column_label: String,
    pub model: TrendModel,
    pub stats: SummaryStats,
    pub quality: FitQuality,
    pub points: Vec<SeriesPoint>,
    pub curve: Vec<f64>,
}
