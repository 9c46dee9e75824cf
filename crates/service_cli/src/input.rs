//! Report inputs read from disk.
//!
//! The JSON input names the portfolio either directly or as a backtest plus
//! weights. Tables may also be supplied as CSV files with a leading `date`
//! column; blank cells are missing observations.

use std::path::Path;

use serde::Deserialize;
use slice_core::types::{BacktestResult, Date, DateTable, PortfolioReturnSeries, Weights};
use slice_risk::aggregator::aggregate_from_backtest;
use slice_risk::scenarios::ScenarioConfig;

use crate::{CliError, Result};

/// Contents of a `slice report --input` file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportInput {
    /// Ready-made portfolio return series
    #[serde(default)]
    pub portfolio: Option<PortfolioReturnSeries>,
    /// Backtest whose strategies are aggregated with `weights`
    #[serde(default)]
    pub backtest: Option<BacktestResult>,
    /// Portfolio weights by asset or strategy identifier
    #[serde(default)]
    pub weights: Option<Weights>,
    /// Identifier of the aggregated portfolio (defaults to the backtest id)
    #[serde(default)]
    pub portfolio_id: Option<String>,
    /// Per-asset returns for the risk rails
    #[serde(default)]
    pub asset_returns: Option<DateTable>,
    /// Factor returns for the regression
    #[serde(default)]
    pub factor_returns: Option<DateTable>,
    /// Macro indicators for regime warnings
    #[serde(default, rename = "macro")]
    pub macro_data: Option<DateTable>,
    /// Factor shock scenarios
    #[serde(default)]
    pub scenarios: Vec<ScenarioConfig>,
}

impl ReportInput {
    /// Read and decode a JSON input file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// The portfolio series, aggregating the backtest when no portfolio is given.
    pub fn portfolio(&self) -> Result<PortfolioReturnSeries> {
        if let Some(portfolio) = &self.portfolio {
            if self.backtest.is_some() {
                tracing::debug!(
                    portfolio_id = portfolio.id(),
                    "explicit portfolio supplied, ignoring backtest"
                );
            }
            return Ok(portfolio.clone());
        }

        match (&self.backtest, &self.weights) {
            (Some(backtest), Some(weights)) => {
                let id = self
                    .portfolio_id
                    .as_deref()
                    .unwrap_or(backtest.backtest_id.as_str());
                tracing::info!(
                    backtest_id = %backtest.backtest_id,
                    strategies = backtest.strategies.len(),
                    "aggregating backtest into portfolio"
                );
                Ok(aggregate_from_backtest(backtest, weights, id)?)
            }
            (Some(_), None) => Err(CliError::invalid_input(
                "a backtest input requires `weights`",
            )),
            (None, _) => Err(CliError::invalid_input(
                "input must contain either `portfolio` or `backtest` with `weights`",
            )),
        }
    }

    /// Asset returns for the rails, falling back to the backtest strategies.
    pub fn asset_returns(&self) -> Result<Option<DateTable>> {
        if let Some(table) = &self.asset_returns {
            return Ok(Some(table.clone()));
        }
        match &self.backtest {
            Some(backtest) if !backtest.strategies.is_empty() => {
                Ok(Some(DateTable::from_series(&backtest.strategies).map_err(
                    |e| CliError::invalid_input(format!("backtest strategies: {}", e)),
                )?))
            }
            _ => Ok(None),
        }
    }
}

/// Load a table from CSV.
///
/// The first column holds ISO dates. Every other header names a column.
pub fn load_csv_table(path: &Path) -> Result<DateTable> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let columns: Vec<String> = reader.headers()?.iter().skip(1).map(str::to_string).collect();

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let location = || format!("{} row {}", path.display(), line + 2);

        let raw_date = record
            .get(0)
            .ok_or_else(|| CliError::invalid_input(format!("{}: missing date", location())))?;
        let date = Date::parse(raw_date)
            .map_err(|e| CliError::invalid_input(format!("{}: {}", location(), e)))?;

        let values = record
            .iter()
            .skip(1)
            .map(|cell| {
                if cell.is_empty() {
                    Ok(None)
                } else {
                    cell.parse::<f64>().map(Some).map_err(|_| {
                        CliError::invalid_input(format!(
                            "{}: '{}' is not a number",
                            location(),
                            cell
                        ))
                    })
                }
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push((date, values));
    }

    let table = DateTable::new(columns, rows)
        .map_err(|e| CliError::invalid_input(format!("{}: {}", path.display(), e)))?;
    tracing::debug!(
        path = %path.display(),
        rows = table.n_rows(),
        columns = table.n_cols(),
        "loaded CSV table"
    );
    Ok(table)
}
