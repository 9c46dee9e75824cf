//! Portfolio performance and risk metrics.

use std::collections::BTreeMap;

use slice_core::math::returns;
use slice_core::types::{Frequency, PortfolioReturnSeries};

/// Summary statistics of a portfolio return series.
///
/// Optional fields are `None` when the statistic is undefined for the data
/// (see [`slice_core::math::returns`]).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskMetrics {
    /// Sampling frequency of the underlying series
    pub frequency: Frequency,
    /// Compounded return over the whole series
    pub total_return: f64,
    /// Compound annual growth rate
    pub cagr: Option<f64>,
    /// Annualised volatility
    pub annualized_vol: f64,
    /// Annualised Sharpe ratio
    pub sharpe: Option<f64>,
    /// Maximum drawdown (`<= 0`)
    pub max_drawdown: f64,
    /// Trailing-window volatility by window label
    pub rolling_vol: BTreeMap<String, f64>,
    /// Trailing-window Sharpe by window label, against a zero rate
    pub rolling_sharpe: BTreeMap<String, f64>,
}

/// Compute all metrics for a portfolio series.
///
/// # Arguments
///
/// * `portfolio` - Portfolio return series
/// * `risk_free_rate_annual` - Annual risk-free rate for the headline Sharpe ratio
/// * `rolling_windows` - Trailing windows for rolling statistics
///
/// # Examples
///
/// ```
/// use slice_core::types::{Date, Frequency, ReturnSeries, TimeSeriesPoint};
/// use slice_risk::metrics::compute_risk_metrics;
///
/// let start = Date::from_ymd(2025, 1, 1).unwrap();
/// let points = (0..60)
///     .map(|i| TimeSeriesPoint::new(start.add_days(i), 0.01))
///     .collect();
/// let portfolio = ReturnSeries::new("P", Frequency::Daily, points).unwrap();
///
/// let metrics = compute_risk_metrics(&portfolio, 0.0, &[21, 63, 252]);
/// assert_eq!(metrics.annualized_vol, 0.0);
/// assert_eq!(metrics.sharpe, None);
/// assert!(metrics.cagr.is_some());
/// assert_eq!(metrics.rolling_vol.len(), 1);
/// ```
pub fn compute_risk_metrics(
    portfolio: &PortfolioReturnSeries,
    risk_free_rate_annual: f64,
    rolling_windows: &[usize],
) -> RiskMetrics {
    let frequency = portfolio.frequency().clone();
    let values = portfolio.values();

    let rolling = returns::rolling_stats(&values, &frequency, rolling_windows);

    RiskMetrics {
        total_return: returns::cumulative_return(&values),
        cagr: returns::cagr(portfolio.points()),
        annualized_vol: returns::annualized_vol(&values, &frequency),
        sharpe: returns::sharpe(&values, &frequency, risk_free_rate_annual),
        max_drawdown: returns::max_drawdown(&values),
        rolling_vol: rolling.vol,
        rolling_sharpe: rolling.sharpe,
        frequency,
    }
}
