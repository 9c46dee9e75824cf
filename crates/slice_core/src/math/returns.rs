//! Return-series algebra: compounding, annualisation, drawdown and VaR.
//!
//! All functions take simple period returns in ascending date order.
//! Insufficient data never panics or errors: each function documents the
//! value it returns when the statistic is undefined.

use std::collections::BTreeMap;

use super::stats;
use crate::types::{year_fraction, Frequency, TimeSeriesPoint};

/// Minimum calendar span, in days, for CAGR to be reported.
pub const MIN_CAGR_SPAN_DAYS: i64 = 30;

/// Default trailing windows for rolling statistics (1M, 3M, 1Y of trading days).
pub const DEFAULT_ROLLING_WINDOWS: [usize; 3] = [21, 63, 252];

/// Compounded return over the whole series: `prod(1 + r) - 1`.
///
/// Returns `0.0` for an empty series.
///
/// ```
/// use slice_core::math::returns::cumulative_return;
///
/// assert!((cumulative_return(&[0.1, 0.1]) - 0.21).abs() < 1e-12);
/// assert_eq!(cumulative_return(&[]), 0.0);
/// ```
pub fn cumulative_return(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    returns.iter().map(|r| 1.0 + r).product::<f64>() - 1.0
}

/// Compound annual growth rate over the calendar span of the points.
///
/// `None` when the series is empty, spans fewer than 30 calendar days, or the
/// growth factor `1 + cumulative_return` is not positive.
pub fn cagr(points: &[TimeSeriesPoint]) -> Option<f64> {
    let (first, last) = (points.first()?, points.last()?);
    if last.date - first.date < MIN_CAGR_SPAN_DAYS {
        return None;
    }

    let years = year_fraction(first.date, last.date);
    if years <= 0.0 {
        return None;
    }

    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let growth = 1.0 + cumulative_return(&values);
    if growth <= 0.0 {
        return None;
    }
    Some(growth.powf(1.0 / years) - 1.0)
}

/// Annualised volatility: sample standard deviation times `sqrt(periods per year)`.
///
/// Returns `0.0` for an empty or single-observation series.
pub fn annualized_vol(returns: &[f64], frequency: &Frequency) -> f64 {
    let factor = (frequency.periods_per_year() as f64).sqrt();
    stats::sample_std(returns).map_or(0.0, |sd| sd * factor)
}

/// Converts an annual risk-free rate to a per-period rate by compounding.
#[inline]
pub fn periodic_risk_free(risk_free_rate_annual: f64, frequency: &Frequency) -> f64 {
    (1.0 + risk_free_rate_annual).powf(1.0 / frequency.periods_per_year() as f64) - 1.0
}

/// Annualised Sharpe ratio of excess returns.
///
/// `None` when the series is empty or the excess returns have zero (or
/// undefined) dispersion.
///
/// ```
/// use slice_core::math::returns::sharpe;
/// use slice_core::types::Frequency;
///
/// assert_eq!(sharpe(&[0.0; 30], &Frequency::Daily, 0.0), None);
/// assert!(sharpe(&[0.01, -0.005, 0.02], &Frequency::Daily, 0.0).unwrap() > 0.0);
/// ```
pub fn sharpe(returns: &[f64], frequency: &Frequency, risk_free_rate_annual: f64) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }
    let rf = periodic_risk_free(risk_free_rate_annual, frequency);
    let excess: Vec<f64> = returns.iter().map(|r| r - rf).collect();

    let sd = stats::sample_std(&excess)?;
    if sd == 0.0 {
        return None;
    }
    let m = stats::mean(&excess)?;
    Some(m / sd * (frequency.periods_per_year() as f64).sqrt())
}

/// Maximum drawdown of the compounded equity curve (a value `<= 0`).
///
/// Returns `0.0` for an empty series.
///
/// ```
/// use slice_core::math::returns::max_drawdown;
///
/// // 1.0 -> 1.1 -> 0.55 -> 0.605: peak 1.1, trough 0.55.
/// assert!((max_drawdown(&[0.1, -0.5, 0.1]) + 0.5).abs() < 1e-12);
/// ```
pub fn max_drawdown(returns: &[f64]) -> f64 {
    let mut equity = 1.0;
    let mut peak = f64::MIN;
    let mut worst = 0.0_f64;
    for r in returns {
        equity *= 1.0 + r;
        peak = peak.max(equity);
        worst = worst.min(equity / peak - 1.0);
    }
    worst
}

/// Trailing-window volatility and Sharpe, keyed by `"{window}D"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RollingStats {
    /// Annualised volatility per window label
    pub vol: BTreeMap<String, f64>,
    /// Annualised Sharpe per window label (omitted where undefined)
    pub sharpe: BTreeMap<String, f64>,
}

/// Volatility and Sharpe over the trailing `window` observations, for each
/// window no longer than the series.
///
/// Windows longer than the available history are skipped. Rolling Sharpe is
/// measured against a zero rate whatever the headline Sharpe uses.
pub fn rolling_stats(returns: &[f64], frequency: &Frequency, windows: &[usize]) -> RollingStats {
    let mut out = RollingStats::default();
    for &w in windows {
        if w == 0 || returns.len() < w {
            continue;
        }
        let tail = &returns[returns.len() - w..];
        let label = format!("{}D", w);

        out.vol.insert(label.clone(), annualized_vol(tail, frequency));
        if let Some(s) = sharpe(tail, frequency, 0.0) {
            out.sharpe.insert(label, s);
        }
    }
    out
}

/// Compounded returns over every complete rolling window of `horizon` periods.
pub fn rolling_compounded(returns: &[f64], horizon: usize) -> Vec<f64> {
    if horizon == 0 {
        return Vec::new();
    }
    returns.windows(horizon).map(cumulative_return).collect()
}

/// Historical VaR from the distribution of horizon-compounded returns.
///
/// Returns the empirical `alpha_95` and `alpha_99` quantiles (losses are
/// negative numbers). `(None, None)` when no complete window exists.
///
/// ```
/// use slice_core::math::returns::historical_var;
///
/// assert_eq!(historical_var(&[0.01; 5], 21, 0.05, 0.01), (None, None));
/// ```
pub fn historical_var(
    returns: &[f64],
    horizon: usize,
    alpha_95: f64,
    alpha_99: f64,
) -> (Option<f64>, Option<f64>) {
    let horizon_returns = rolling_compounded(returns, horizon);
    (
        stats::quantile(&horizon_returns, alpha_95),
        stats::quantile(&horizon_returns, alpha_99),
    )
}
