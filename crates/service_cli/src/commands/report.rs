//! Report command implementation
//!
//! Builds a risk report from a JSON input file and writes it as JSON or text.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use slice_core::types::Date;
use slice_risk::report::render_text;
use slice_risk::{RiskReport, RiskReportBuilder};

use crate::config::CliConfig;
use crate::input::{load_csv_table, ReportInput};
use crate::{CliError, Result};

/// Output encoding of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Fixed-order plain text
    Text,
}

/// Arguments of `slice report`.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Path to the JSON report input
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub as_of: Option<String>,

    /// CSV of asset returns, replacing any table in the input
    #[arg(long)]
    pub asset_returns: Option<PathBuf>,

    /// CSV of factor returns, replacing any table in the input
    #[arg(long)]
    pub factor_returns: Option<PathBuf>,

    /// CSV of macro indicators, replacing any table in the input
    #[arg(long = "macro")]
    pub macro_data: Option<PathBuf>,
}

/// Run the report command
pub fn run(args: &ReportArgs, config: &CliConfig) -> Result<()> {
    tracing::info!(input = %args.input.display(), format = ?args.format, "Generating report");

    let mut input = ReportInput::load(&args.input)?;
    if let Some(path) = &args.asset_returns {
        input.asset_returns = Some(load_csv_table(path)?);
    }
    if let Some(path) = &args.factor_returns {
        input.factor_returns = Some(load_csv_table(path)?);
    }
    if let Some(path) = &args.macro_data {
        input.macro_data = Some(load_csv_table(path)?);
    }

    let as_of = args
        .as_of
        .as_deref()
        .map(|s| Date::parse(s).map_err(|e| CliError::InvalidArgument(format!("--as-of: {}", e))))
        .transpose()?;

    let report = build_report(&input, config, as_of)?;
    let rendered = render(&report, args.format)?;
    write_output(args.output.as_deref(), &rendered)?;

    tracing::info!(
        portfolio_id = report.portfolio.id(),
        scenarios = report.scenarios.len(),
        "Report generation complete"
    );
    Ok(())
}

/// Build a report from decoded inputs and the resolved configuration.
pub fn build_report(
    input: &ReportInput,
    config: &CliConfig,
    as_of: Option<Date>,
) -> Result<RiskReport> {
    let portfolio = input.portfolio()?;
    let asset_returns = input.asset_returns()?;

    let mut builder = RiskReportBuilder::new(&portfolio)
        .config(config.risk.clone())
        .scenarios(&input.scenarios);
    if let Some(table) = &asset_returns {
        builder = builder.asset_returns(table);
    }
    if let Some(weights) = &input.weights {
        builder = builder.weights(weights);
    }
    if let Some(table) = &input.factor_returns {
        builder = builder.factor_data(table);
    }
    if let Some(table) = &input.macro_data {
        builder = builder.macro_data(table);
    }
    if let Some(date) = as_of {
        builder = builder.as_of(date);
    }

    Ok(builder.build()?)
}

/// Encode a report in the requested format.
pub fn render(report: &RiskReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => Ok(render_text(report)),
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
            tracing::info!(path = %path.display(), "Report written");
        }
        None => println!("{}", content),
    }
    Ok(())
}
