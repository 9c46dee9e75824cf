//! Slice CLI - risk reports for macro-thesis portfolios
//!
//! # Commands
//!
//! - `slice report --input <file.json>` - Build a risk report from backtest or portfolio data
//! - `slice check` - Validate the configuration
//! - `slice demo` - Build a report over a synthetic book
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate reads inputs and
//! configuration, drives `slice_risk`, and writes the report.

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

mod commands;
mod config;
mod error;
mod input;

pub use error::{CliError, Result};

use commands::report::{OutputFormat, ReportArgs};
use config::CliConfig;

/// Slice portfolio risk CLI
#[derive(Parser)]
#[command(name = "slice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "slice.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a risk report
    Report(ReportArgs),

    /// Check the configuration
    Check,

    /// Build a report over a synthetic book
    Demo {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Install the subscriber before anything else logs.
///
/// `RUST_LOG` wins, then `--verbose`, then `info` until the configuration
/// is loaded.
fn init_tracing(verbose: bool) -> FilterHandle {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
    handle
}

/// Level from the configuration, unless `RUST_LOG` or `--verbose` decided it.
fn configured_level(verbose: bool, rust_log_set: bool, config: &CliConfig) -> Option<&str> {
    if verbose || rust_log_set {
        None
    } else {
        Some(config.log_level.as_str())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter = init_tracing(cli.verbose);

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let config_path = Path::new(&cli.config);
    let load_config = || -> anyhow::Result<CliConfig> {
        let config =
            CliConfig::resolve(config_path).with_context(|| format!("loading {}", cli.config))?;
        let rust_log_set = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();
        if let Some(level) = configured_level(cli.verbose, rust_log_set, &config) {
            filter.reload(EnvFilter::new(level))?;
        }
        Ok(config)
    };

    match cli.command {
        Commands::Report(args) => commands::report::run(&args, &load_config()?)?,
        Commands::Check => commands::check::run(config_path)?,
        Commands::Demo { format } => commands::demo::run(&load_config()?, format)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_yields_to_explicit_choices() {
        let mut config = CliConfig::default();
        config.log_level = "warn".to_string();

        assert_eq!(configured_level(false, false, &config), Some("warn"));
        assert_eq!(configured_level(true, false, &config), None);
        assert_eq!(configured_level(false, true, &config), None);
    }

    #[test]
    fn test_cli_parses_report_arguments() {
        let cli = Cli::parse_from([
            "slice", "-v", "report", "--input", "in.json", "--format", "text", "--as-of",
            "2024-01-05",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config, "slice.toml");
        match cli.command {
            Commands::Report(args) => {
                assert_eq!(args.format, OutputFormat::Text);
                assert_eq!(args.as_of.as_deref(), Some("2024-01-05"));
            }
            _ => panic!("Expected report command"),
        }
    }
}
