use analytics::AnalyticsEngine;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use configuration::load_config;
use core_types::{FinancialSeries, MonthlyFinancialRecord};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod render;

/// The main entry point for the FinHealth command-line tool.
fn main() -> Result<()> {
    let cli = Cli::parse();
    // Dropping the guard flushes buffered file logs, so it lives until exit.
    let _guard = init_tracing(cli.log_dir.as_deref())?;

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let engine = AnalyticsEngine::new(config);

    match cli.command {
        Commands::Score(args) => handle_score(&engine, &args),
        Commands::Ratios(args) => handle_ratios(&engine, &args),
        Commands::Trend(args) => handle_trend(&engine, &args),
        Commands::Forecast(args) => handle_forecast(&engine, &args),
        Commands::Report(args) => handle_report(&engine, &args),
        Commands::Validate(args) => handle_validate(&args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Financial health scoring, trend analysis and forecasting for small businesses.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// A TOML configuration file. Without it, `finhealth.toml` is read if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to daily rolling files in this directory instead of stderr.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the latest financial score summary.
    Score(InputArgs),
    /// Show every ratio for the latest month.
    Ratios(InputArgs),
    /// Show the monthly trend of scores and key ratios.
    Trend(InputArgs),
    /// Show the twelve-month forecast under three scenarios.
    Forecast(InputArgs),
    /// Show everything derived from the records.
    Report(InputArgs),
    /// Check that records are unique by month and in date order.
    Validate(ValidateArgs),
}

#[derive(Args)]
struct InputArgs {
    /// A JSON array of monthly financial records.
    #[arg(long, short)]
    input: PathBuf,

    /// Print JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ValidateArgs {
    /// A JSON array of monthly financial records.
    #[arg(long, short)]
    input: PathBuf,
}

// ==============================================================================
// Setup
// ==============================================================================

fn init_tracing(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let builder = FmtSubscriber::builder().with_env_filter(EnvFilter::from_default_env());

    match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "finhealth.log");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            let subscriber = builder.with_writer(writer).with_ansi(false).finish();
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(Some(guard))
        }
        None => {
            let subscriber = builder.with_writer(std::io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(None)
        }
    }
}

fn load_records(path: &Path) -> Result<Vec<MonthlyFinancialRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read records from {}", path.display()))?;
    let records: Vec<MonthlyFinancialRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse records in {}", path.display()))?;
    tracing::info!(path = %path.display(), records = records.len(), "Loaded records.");
    Ok(records)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_score(engine: &AnalyticsEngine, args: &InputArgs) -> Result<()> {
    let bundle = engine.calculate(&load_records(&args.input)?);
    if args.json {
        return print_json(&bundle.score);
    }
    println!("{}", render::score_table(&bundle.score));
    Ok(())
}

fn handle_ratios(engine: &AnalyticsEngine, args: &InputArgs) -> Result<()> {
    let bundle = engine.calculate(&load_records(&args.input)?);
    if args.json {
        return print_json(&bundle.latest_ratios);
    }
    println!("{}", render::ratio_table(&bundle.latest_ratios));
    Ok(())
}

fn handle_trend(engine: &AnalyticsEngine, args: &InputArgs) -> Result<()> {
    let bundle = engine.calculate(&load_records(&args.input)?);
    if args.json {
        return print_json(&bundle.trend);
    }
    if bundle.trend.is_empty() {
        println!("Not enough history for a trend: 13 months are needed, {} given.", bundle.months);
        return Ok(());
    }
    println!("{}", render::trend_table(&bundle.trend));
    Ok(())
}

fn handle_forecast(engine: &AnalyticsEngine, args: &InputArgs) -> Result<()> {
    let bundle = engine.calculate(&load_records(&args.input)?);
    if args.json {
        return print_json(&bundle.forecast);
    }
    print_forecast(&bundle.forecast);
    Ok(())
}

fn handle_report(engine: &AnalyticsEngine, args: &InputArgs) -> Result<()> {
    let bundle = engine.calculate(&load_records(&args.input)?);
    if args.json {
        return print_json(&bundle);
    }

    println!("Months analysed: {}", bundle.months);
    println!("\n{}", render::score_table(&bundle.score));
    println!("\n{}", render::ratio_table(&bundle.latest_ratios));
    if !bundle.trend.is_empty() {
        println!("\n{}", render::trend_table(&bundle.trend));
    }
    println!();
    print_forecast(&bundle.forecast);
    Ok(())
}

fn handle_validate(args: &ValidateArgs) -> Result<()> {
    let records = load_records(&args.input)?;
    FinancialSeries::validate(&records)
        .with_context(|| format!("{} is not a valid monthly series", args.input.display()))?;

    match (records.first(), records.last()) {
        (Some(first), Some(last)) => println!(
            "OK: {} months from {} to {}.",
            records.len(),
            first.month_key(),
            last.month_key()
        ),
        _ => println!("OK: no records."),
    }
    Ok(())
}

fn print_forecast(forecast: &forecast::ForecastResult) {
    println!("Forecast method: {:?}", forecast.method);
    for scenario in forecast.scenarios() {
        if scenario.is_empty() {
            continue;
        }
        println!("\n{}", scenario.kind.as_str());
        println!("{}", render::forecast_table(scenario));
    }
}
