//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initializes logging
//! - parses CLI arguments
//! - runs ingest + normalization + fitting
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::{Command, ExportArgs, FitArgs, PlotArgs, SampleArgs};
use crate::domain::{AnalysisConfig, Degree};
use crate::error::AppError;
use crate::io::sample::SampleSpec;

pub mod pipeline;

use pipeline::{Session, run_analysis};

/// Entry point for the `trend` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` may carry TREND_INPUT / TREND_COLUMN / RUST_LOG.
    dotenvy::dotenv().ok();
    init_logging();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Export(args) => handle_export(args),
        Command::Plot(args) => handle_plot(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (e.g. in tests) is harmless; ignore the error.
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = analysis_config_from_fit_args(&args);
    let session = Session::new();
    let run = run_analysis(&session, &config)?;

    println!("{}", crate::report::format_run_summary(&run, config.column));

    if let Ok(fit) = &run.trend {
        if config.show_table {
            println!("{}", crate::report::format_table(fit));
        }
        if config.plot {
            println!(
                "{}",
                crate::plot::render_ascii_plot(fit, config.plot_width, config.plot_height)
            );
        }
        if let Some(path) = &config.export_trend {
            crate::io::trend::write_trend_json(path, fit)?;
            info!(path = %path.display(), "wrote trend JSON");
        }
    }

    // The column view is exportable even when the fit is underdetermined.
    if let Some(path) = &config.export_csv {
        let bytes = session.export_bytes(&run)?;
        crate::io::export::write_export(path, &bytes)?;
        info!(path = %path.display(), rows = run.points.len(), "wrote CSV export");
    }

    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let config = AnalysisConfig {
        input: args.input.file.clone(),
        skip_rows: args.input.skip_rows,
        column: args.select.column,
        degree: Degree::Linear,
        range: args.select.range_spec(),
        show_table: false,
        plot: false,
        plot_width: 0,
        plot_height: 0,
        export_csv: Some(args.out.clone()),
        export_trend: None,
    };
    let session = Session::new();
    let run = run_analysis(&session, &config)?;

    let bytes = session.export_bytes(&run)?;
    crate::io::export::write_export(&args.out, &bytes)?;
    println!(
        "Exported {} row(s) of {} to {}",
        run.points.len(),
        run.column.display_name(),
        args.out.display()
    );
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let trend = crate::io::trend::read_trend_json(&args.trend)?;
    println!(
        "{} ({}) | degree {}",
        trend.column_label,
        trend.column.display_name(),
        trend.model.degree
    );
    println!(
        "{}",
        crate::plot::render_ascii_plot_from_trend_file(&trend, args.width, args.height)
    );
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let spec = SampleSpec {
        symbol: args.symbol.clone(),
        start: args.start,
        days: args.days,
        start_price: args.price,
        drift: args.drift,
        volatility: args.volatility,
        bad_date_share: args.bad_share,
        seed: args.seed,
    };
    let rows = crate::io::sample::generate_sheet(&spec)?;
    crate::io::sample::write_sheet_csv(&args.out, &spec.symbol, &rows)?;
    println!(
        "Wrote {} rows to {} (read it back with --skip-rows 1)",
        rows.len(),
        args.out.display()
    );
    Ok(())
}

pub fn analysis_config_from_fit_args(args: &FitArgs) -> AnalysisConfig {
    AnalysisConfig {
        input: args.input.file.clone(),
        skip_rows: args.input.skip_rows,
        column: args.select.column,
        degree: args.degree,
        range: args.select.range_spec(),
        show_table: args.table,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_csv: args.export.clone(),
        export_trend: args.export_trend.clone(),
    }
}
