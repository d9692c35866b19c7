//! Trailing one-year returns for every fund document in a directory
//!
//! Writes one CSV row per scheme, including schemes whose return could not
//! be estimated.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

use sip_calculator::nav::{DocumentDirProvider, FallbackProvider, HistoricalSeriesProvider};
use sip_calculator::TrailingReturn;

#[derive(Parser)]
#[command(name = "fund_returns", about = "Estimate trailing returns for a directory of fund documents")]
struct Cli {
    /// Directory of `<scheme_code>.json` documents
    #[arg(long)]
    dir: PathBuf,

    /// Directory consulted when a document in `dir` is missing or unreadable
    #[arg(long)]
    fallback_dir: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    as_of: Option<NaiveDate>,

    #[arg(long, default_value = "fund_returns.csv")]
    output: PathBuf,
}

#[derive(Debug, Serialize)]
struct ReportRow {
    scheme_code: String,
    scheme_name: String,
    nav_points: usize,
    current_date: Option<NaiveDate>,
    current_nav: Option<f64>,
    base_date: Option<NaiveDate>,
    base_nav: Option<f64>,
    return_pct: Option<f64>,
    full_window: Option<bool>,
    error: Option<String>,
}

impl ReportRow {
    fn failed(scheme_code: &str, scheme_name: &str, nav_points: usize, error: String) -> Self {
        Self {
            scheme_code: scheme_code.to_string(),
            scheme_name: scheme_name.to_string(),
            nav_points,
            current_date: None,
            current_nav: None,
            base_date: None,
            base_nav: None,
            return_pct: None,
            full_window: None,
            error: Some(error),
        }
    }
}

fn report<P: HistoricalSeriesProvider>(provider: &P, scheme_code: &str, as_of: NaiveDate) -> ReportRow {
    let series = match provider.series(scheme_code) {
        Ok(series) => series,
        Err(err) => {
            warn!("Skipping {}: {}", scheme_code, err);
            return ReportRow::failed(scheme_code, "", 0, err.to_string());
        }
    };

    match TrailingReturn::estimate(&series.points, as_of) {
        Ok(trailing) => ReportRow {
            scheme_code: scheme_code.to_string(),
            scheme_name: series.label().to_string(),
            nav_points: series.points.len(),
            current_date: Some(trailing.current.date),
            current_nav: Some(trailing.current.value),
            base_date: Some(trailing.base.date),
            base_nav: Some(trailing.base.value),
            return_pct: Some(trailing.percent),
            full_window: Some(trailing.full_window),
            error: None,
        },
        Err(err) => ReportRow::failed(scheme_code, series.label(), series.points.len(), err.to_string()),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let start = Instant::now();
    let as_of = cli.as_of.unwrap_or_else(|| Local::now().date_naive());

    let primary = DocumentDirProvider::new(&cli.dir);
    let scheme_codes = primary
        .scheme_codes()
        .with_context(|| format!("Failed to list {}", cli.dir.display()))?;
    info!("Found {} fund documents in {}", scheme_codes.len(), cli.dir.display());

    let fallback = DocumentDirProvider::new(cli.fallback_dir.as_ref().unwrap_or(&cli.dir));
    let provider = FallbackProvider::new(primary, fallback);

    let rows: Vec<ReportRow> = scheme_codes
        .par_iter()
        .map(|code| report(&provider, code, as_of))
        .collect();

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("Unable to create {}", cli.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let estimated = rows.iter().filter(|r| r.return_pct.is_some()).count();
    println!(
        "Estimated {} of {} funds as of {} in {:?}",
        estimated,
        rows.len(),
        as_of,
        start.elapsed()
    );
    println!("Output written to {}", cli.output.display());
    Ok(())
}
