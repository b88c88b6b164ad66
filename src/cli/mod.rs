//! Command-line parsing for the price trend tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the normalization/fitting code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::calendar::parse_thai_date;
use crate::domain::{Degree, RangeSpec, ValueColumn};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "trend", version, about = "Polynomial trend of Thai-calendar daily price sheets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a trend, print stats, and optionally plot/table/export.
    Fit(FitArgs),
    /// Export the selected column and window to a BOM-prefixed CSV.
    Export(ExportArgs),
    /// Plot a previously exported trend JSON.
    Plot(PlotArgs),
    /// Write a synthetic price sheet (for demos and testing).
    Sample(SampleArgs),
}

/// Where to read the sheet from.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Sheet CSV (date + 11 value columns).
    #[arg(short = 'f', long = "file", env = "TREND_INPUT", value_name = "CSV")]
    pub file: PathBuf,

    /// Title rows before the header row.
    #[arg(long, default_value_t = 0)]
    pub skip_rows: usize,
}

/// Column and window selection.
#[derive(Debug, Args, Clone)]
pub struct SelectArgs {
    /// Value column to analyze.
    #[arg(short = 'c', long, value_enum, env = "TREND_COLUMN", default_value_t = ValueColumn::Close)]
    pub column: ValueColumn,

    /// Window start (YYYY-MM-DD or Thai date like "2 ม.ค. 2567").
    #[arg(long, value_parser = parse_cli_date)]
    pub from: Option<NaiveDate>,

    /// Window end, inclusive (same formats as --from).
    #[arg(long, value_parser = parse_cli_date)]
    pub to: Option<NaiveDate>,

    /// Trailing window of N months ending at --to (or the last date).
    #[arg(long, conflicts_with = "from")]
    pub last_months: Option<u32>,
}

impl SelectArgs {
    pub fn range_spec(&self) -> RangeSpec {
        RangeSpec {
            from: self.from,
            to: self.to,
            last_months: self.last_months,
        }
    }
}

/// Options for fitting.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub select: SelectArgs,

    /// Polynomial degree of the trend.
    #[arg(short = 'd', long, value_enum, default_value_t = Degree::Linear)]
    pub degree: Degree,

    /// Print the fitted view as a table.
    #[arg(long)]
    pub table: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the column view to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the trend (model + stats + curve) to JSON.
    #[arg(long = "export-trend", value_name = "JSON")]
    pub export_trend: Option<PathBuf>,
}

/// Options for the export subcommand.
#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub select: SelectArgs,

    /// Output CSV path.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub out: PathBuf,
}

/// Options for plotting a saved trend.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Trend JSON file produced by `trend fit --export-trend`.
    #[arg(long, value_name = "JSON")]
    pub trend: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for synthetic sheet generation.
#[derive(Debug, Args)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub out: PathBuf,

    /// Symbol used in the title row.
    #[arg(long, default_value = "CPF")]
    pub symbol: String,

    /// First trading day.
    #[arg(long, value_parser = parse_cli_date, default_value = "2024-01-02")]
    pub start: NaiveDate,

    /// Number of trading days.
    #[arg(long, default_value_t = 120)]
    pub days: usize,

    /// Opening price.
    #[arg(long, default_value_t = 24.0)]
    pub price: f64,

    /// Mean daily log return.
    #[arg(long, default_value_t = 0.0003)]
    pub drift: f64,

    /// Daily log-return volatility.
    #[arg(long, default_value_t = 0.015)]
    pub volatility: f64,

    /// Share of rows written with an unparseable date.
    #[arg(long, default_value_t = 0.02)]
    pub bad_share: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Accept ISO dates or the sheet's Thai-calendar form.
pub fn parse_cli_date(s: &str) -> Result<NaiveDate, String> {
    if let Ok(d) = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
        return Ok(d);
    }
    parse_thai_date(s).map_err(|e| format!("expected YYYY-MM-DD or a Thai date ({e})"))
}
