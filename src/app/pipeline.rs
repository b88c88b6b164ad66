//! Shared analysis pipeline used by the CLI subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV ingest -> date normalization -> window selection -> stats -> trend fit
//!
//! The front-ends can then focus on presentation (printing, exporting).

use std::sync::Arc;

use tracing::info;

use crate::cache::{ExportCache, SeriesCache};
use crate::calendar::Normalized;
use crate::domain::{AnalysisConfig, DateRange, SeriesPoint, SummaryStats, TrendFit, ValueColumn, column_points};
use crate::error::{AppError, FitError};
use crate::fit::{fit, summarize};
use crate::io::ingest::{IngestedData, load_records};

/// All computed outputs of a single analysis run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub normalized: Arc<Normalized>,
    pub column: ValueColumn,
    /// Resolved window; `None` means the whole series.
    pub range: Option<DateRange>,
    /// Entries in the window (before column projection).
    pub view_len: usize,
    /// The window projected onto the selected column.
    pub points: Vec<SeriesPoint>,
    /// `None` when the window holds no values.
    pub stats: Option<SummaryStats>,
    pub trend: Result<TrendFit, FitError>,
}

/// Caches shared across repeated analyses of the same input.
#[derive(Debug, Default)]
pub struct Session {
    series: SeriesCache,
    exports: ExportCache,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize (cached), select the window, and fit.
    ///
    /// Only "nothing could be dated" is an error here; an empty window or an
    /// underdetermined fit is reported through `RunOutput::trend`.
    pub fn analyze(&self, ingest: IngestedData, config: &AnalysisConfig) -> Result<RunOutput, AppError> {
        let normalized = self.series.get_or_normalize(&ingest.records);
        let series = &normalized.series;

        let (Some(first), Some(last)) = (series.first_date(), series.last_date()) else {
            return Err(AppError::from(FitError::NoData));
        };

        // Only bounds the user typed can be inverted; a lone bound outside the
        // series is an empty window.
        if let (Some(from), Some(to)) = (config.range.from, config.range.to) {
            if from > to {
                return Err(AppError::new(
                    2,
                    format!("Invalid date range: start {from} is after end {to}."),
                ));
            }
        }
        let range = config.range.resolve(first, last);

        let view = series.view(range);
        let points = column_points(view, config.column);
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        let stats = summarize(&values);
        let trend = fit(series, config.column, config.degree, range);

        info!(
            dated = series.len(),
            dropped = normalized.dropped.len(),
            window = view.len(),
            fitted = trend.is_ok(),
            "analysis complete"
        );

        let view_len = view.len();
        Ok(RunOutput {
            ingest,
            column: config.column,
            range,
            view_len,
            points,
            stats,
            trend,
            normalized,
        })
    }

    /// BOM-prefixed CSV of the run's column view (cached).
    pub fn export_bytes(&self, run: &RunOutput) -> Result<Arc<Vec<u8>>, AppError> {
        self.exports.get_or_render(&run.points, run.column)
    }
}

/// Load the input CSV and run the analysis once.
pub fn run_analysis(session: &Session, config: &AnalysisConfig) -> Result<RunOutput, AppError> {
    let ingest = load_records(&config.input, config.skip_rows)?;
    session.analyze(ingest, config)
}
