//! Numerical routines over return series.
//!
//! - `stats`: mean, sample standard deviation, Pearson correlation, quantiles
//! - `returns`: compounding, CAGR, volatility, Sharpe, drawdown, rolling
//!   statistics and historical VaR

pub mod returns;
pub mod stats;
