//! SIP Calculator CLI
//!
//! Command-line front end for SIP projections and trailing return estimates

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};

use sip_calculator::format::{format_percent, format_rupees};
use sip_calculator::nav::load_history;
use sip_calculator::{
    project_sip, suggested_rate, CalculatorConfig, DayChange, ProjectionResult, ScenarioRunner, TrailingReturn,
};

#[derive(Parser)]
#[command(name = "sip", version, about = "SIP projections and fund trailing returns")]
struct Cli {
    /// JSON file with calculator defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project a monthly SIP
    Project {
        #[command(flatten)]
        inputs: Inputs,

        /// Annual return in percent
        #[arg(long, allow_negative_numbers = true)]
        rate: Option<f64>,

        #[command(flatten)]
        output: Output,
    },
    /// Estimate a fund's trailing one-year return from NAV history
    Estimate {
        /// Fund history JSON document or `date,nav` CSV
        #[arg(long)]
        history: PathBuf,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Estimate a fund's return, then project a SIP at that rate
    Plan {
        #[arg(long)]
        history: PathBuf,

        #[arg(long)]
        as_of: Option<NaiveDate>,

        #[command(flatten)]
        inputs: Inputs,

        #[command(flatten)]
        output: Output,
    },
    /// Compare projections across several annual returns
    Sweep {
        #[command(flatten)]
        inputs: Inputs,

        /// Comma-separated annual returns in percent
        #[arg(long, value_delimiter = ',', default_value = "8,10,12,15", allow_negative_numbers = true)]
        rates: Vec<f64>,
    },
}

#[derive(Args)]
struct Inputs {
    /// Monthly contribution
    #[arg(long)]
    monthly: Option<f64>,

    /// Investment horizon in years
    #[arg(long)]
    years: Option<u32>,
}

#[derive(Args)]
struct Output {
    /// Print the projection as JSON
    #[arg(long)]
    json: bool,

    /// Write the yearly series to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Project { inputs, rate, output } => {
            let mut config = apply_inputs(config, &inputs);
            if let Some(rate) = rate {
                config.annual_return_percent = rate;
            }
            run_projection(&config, &output)
        }
        Command::Estimate { history, as_of } => {
            estimate(&history, as_of)?;
            Ok(())
        }
        Command::Plan { history, as_of, inputs, output } => {
            let mut config = apply_inputs(config, &inputs);
            let trailing = match estimate(&history, as_of) {
                Ok(trailing) => Some(trailing.percent),
                Err(err) => {
                    warn!("No usable trailing return: {:#}", err);
                    None
                }
            };
            config.annual_return_percent = suggested_rate(trailing, config.fallback_return_percent);
            println!("Using annual return: {}\n", format_percent(config.annual_return_percent));
            run_projection(&config, &output)
        }
        Command::Sweep { inputs, rates } => {
            let config = apply_inputs(config, &inputs);
            sweep(&config, &rates);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<CalculatorConfig> {
    let config = match path {
        Some(path) => CalculatorConfig::from_json_path(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => CalculatorConfig::default(),
    };
    Ok(config.apply_env())
}

fn apply_inputs(mut config: CalculatorConfig, inputs: &Inputs) -> CalculatorConfig {
    if let Some(monthly) = inputs.monthly {
        config.monthly_contribution = monthly;
    }
    if let Some(years) = inputs.years {
        config.horizon_years = years;
    }
    config
}

fn run_projection(config: &CalculatorConfig, output: &Output) -> Result<()> {
    let params = config.parameters();
    for warning in config.limits.check(&params) {
        warn!("{}", warning);
    }

    let result = project_sip(&params).context("Projection failed")?;
    let display = result.rounded();

    if output.json {
        println!("{}", serde_json::to_string_pretty(&display)?);
    } else {
        print_projection(&display);
    }

    if let Some(path) = &output.csv {
        write_series_csv(path, &display)?;
        println!("\nSeries written to: {}", path.display());
    }
    Ok(())
}

fn print_projection(result: &ProjectionResult) {
    let params = &result.parameters;
    println!(
        "SIP of {}/month at {} p.a. for {} years",
        format_rupees(params.monthly_contribution),
        format_percent(params.annual_return_percent),
        params.horizon_years
    );
    println!("  Invested Amount: {}", format_rupees(result.total_invested));
    println!("  Est. Returns:    {}", format_rupees(result.estimated_gains));
    println!("  Total Value:     {}", format_rupees(result.total_value));
    println!();
    println!("{:>5} {:>18} {:>18}", "Year", "Invested", "Value");
    println!("{}", "-".repeat(43));
    for point in &result.series {
        println!(
            "{:>5} {:>18} {:>18}",
            point.year_index,
            format_rupees(point.invested_to_date),
            format_rupees(point.value_to_date)
        );
    }
}

fn write_series_csv(path: &Path, result: &ProjectionResult) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("Unable to create {}", path.display()))?;
    for point in &result.series {
        writer.serialize(point)?;
    }
    writer.flush()?;
    Ok(())
}

fn estimate(history: &Path, as_of: Option<NaiveDate>) -> Result<TrailingReturn> {
    let series = load_history(history).with_context(|| format!("Failed to load {}", history.display()))?;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    info!("Loaded {} NAV points for {}", series.points.len(), series.label());

    let trailing = TrailingReturn::estimate(&series.points, as_of)
        .with_context(|| format!("Cannot estimate return for {}", series.label()))?;

    println!("Fund: {}", series.label());
    println!(
        "  NAV {:.4} on {} vs {:.4} on {} ({} days)",
        trailing.current.value,
        trailing.current.date,
        trailing.base.value,
        trailing.base.date,
        trailing.elapsed_days()
    );
    if !trailing.full_window {
        println!("  History is shorter than one year; compared with the oldest NAV");
    }
    println!("  1Y Return: {}", format_percent(trailing.percent));

    if let Ok(change) = DayChange::latest(&series.points) {
        println!(
            "  Day change: {}{:.4} ({})",
            if change.is_positive() { "+" } else { "" },
            change.change,
            format_percent(change.change_percent)
        );
    }
    Ok(trailing)
}

fn sweep(config: &CalculatorConfig, rates: &[f64]) {
    let runner = ScenarioRunner::new(config.parameters());
    let base = runner.base();
    println!(
        "SIP of {}/month for {} years",
        format_rupees(base.monthly_contribution),
        base.horizon_years
    );
    println!("{:>9} {:>18} {:>18} {:>18}", "Rate", "Invested", "Est. Returns", "Total Value");
    println!("{}", "-".repeat(66));

    for row in runner.rate_sweep(rates) {
        match row.result {
            Ok(result) => {
                let result = result.rounded();
                println!(
                    "{:>9} {:>18} {:>18} {:>18}",
                    format_percent(row.annual_return_percent),
                    format_rupees(result.total_invested),
                    format_rupees(result.estimated_gains),
                    format_rupees(result.total_value)
                );
            }
            Err(err) => println!("{:>9} {}", format_percent(row.annual_return_percent), err),
        }
    }
}
