//! Demo command: a risk report over a synthetic multi-strategy book.
//!
//! Three strategies load on two smooth synthetic factors. Two of them are
//! near copies, so the correlation rail links them, and the macro snapshot
//! is set to trip the curve inversion and VIX warnings.

use slice_core::types::{
    BacktestResult, Date, DateTable, Frequency, ReturnSeries, TimeSeriesPoint, Weights,
};
use slice_risk::scenarios::ScenarioConfig;
use slice_risk::RiskError;

use super::report::{build_report, render, OutputFormat};
use crate::config::CliConfig;
use crate::input::ReportInput;
use crate::{CliError, Result};

const DEMO_DAYS: i64 = 260;

fn rates_factor(t: f64) -> f64 {
    0.004 * (0.37 * t).sin()
}

fn equity_factor(t: f64) -> f64 {
    0.008 * (0.21 * t + 1.0).sin()
}

/// Build the synthetic report input used by the demo.
pub fn sample_input() -> Result<ReportInput> {
    let start =
        Date::from_ymd(2023, 1, 2).map_err(|e| CliError::invalid_input(e.to_string()))?;
    let dates: Vec<Date> = (0..DEMO_DAYS).map(|i| start.add_days(i)).collect();

    let strategy = |id: &str, f: &dyn Fn(f64) -> f64| -> Result<ReturnSeries> {
        let points = dates
            .iter()
            .enumerate()
            .map(|(i, d)| TimeSeriesPoint::new(*d, f(i as f64)))
            .collect();
        Ok(ReturnSeries::new(id, Frequency::Daily, points).map_err(RiskError::from)?)
    };

    let carry = |t: f64| 0.0003 + 0.5 * rates_factor(t) + 0.0015 * (1.3 * t).cos();
    let backtest = BacktestResult::new(
        "demo-backtest",
        Frequency::Daily,
        vec![
            strategy("carry", &carry)?,
            strategy("carry_hedged", &|t: f64| 0.95 * carry(t) + 0.0002 * (3.7 * t).sin())?,
            strategy("trend", &|t: f64| {
                0.0002 + 0.8 * equity_factor(t) + 0.002 * (2.1 * t).sin()
            })?,
        ],
    );

    let weights = Weights::new([("carry", 0.45), ("trend", 0.35), ("carry_hedged", 0.20)])
        .map_err(RiskError::from)?;

    let factor_returns = DateTable::new(
        vec!["RATES".to_string(), "EQUITY".to_string()],
        dates
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let t = i as f64;
                (*d, vec![Some(rates_factor(t)), Some(equity_factor(t))])
            })
            .collect(),
    )
    .map_err(RiskError::from)?;

    let last = dates[dates.len() - 1];
    let macro_data = DateTable::new(
        vec![
            "yc_10y_2y".to_string(),
            "cpi_yoy".to_string(),
            "vix".to_string(),
        ],
        vec![
            (last.add_days(-30), vec![Some(12.0), Some(4.6), Some(19.0)]),
            (last, vec![Some(-35.0), Some(3.1), Some(27.5)]),
        ],
    )
    .map_err(RiskError::from)?;

    let scenarios = vec![
        ScenarioConfig::named("Rates +100bp")
            .with_description("Parallel rates factor shock")
            .with_shock("RATES", 0.01),
        ScenarioConfig::named("Equity selloff").with_shock("EQUITY", -0.10),
        ScenarioConfig::named("Stagflation")
            .with_description("Rates up with equities down")
            .with_shock("RATES", 0.015)
            .with_shock("EQUITY", -0.08),
    ];

    Ok(ReportInput {
        backtest: Some(backtest),
        weights: Some(weights),
        portfolio_id: Some("demo-book".to_string()),
        factor_returns: Some(factor_returns),
        macro_data: Some(macro_data),
        scenarios,
        ..ReportInput::default()
    })
}

/// Runs the demo and prints the report.
pub fn run(config: &CliConfig, format: OutputFormat) -> Result<()> {
    tracing::info!("Building synthetic demo book");
    let input = sample_input()?;

    let report = build_report(&input, config, None)?;
    tracing::info!(
        observations = report.portfolio.len(),
        clusters = report.risk_rails.correlation_cluster_flags.len(),
        warnings = report.risk_rails.regime_warnings.len(),
        "Demo report built"
    );

    println!("{}", render(&report, format)?);
    Ok(())
}
