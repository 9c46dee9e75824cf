//! Value types flowing between the risk computations.
//!
//! This module provides:
//! - `time`: Calendar [`Date`] and the actual/365.25 [`year_fraction`]
//! - `frequency`: Sampling [`Frequency`] and its annualisation factor
//! - `series`: [`TimeSeriesPoint`], [`ReturnSeries`] and [`BacktestResult`]
//! - `weights`: Insertion-ordered [`Weights`]
//! - `table`: Date-indexed [`DateTable`] for asset, factor and macro data
//! - `error`: Contract-violation errors for all of the above

pub mod error;
pub mod frequency;
pub mod series;
pub mod table;
pub mod time;
pub mod weights;

pub use error::{DateError, SeriesError, TableError, WeightsError};
pub use frequency::{Frequency, TRADING_DAYS_PER_YEAR};
pub use series::{
    BacktestResult, PortfolioReturnSeries, ReturnSeries, StrategyReturnSeries, TimeSeriesPoint,
};
pub use table::DateTable;
pub use time::{year_fraction, Date, DAYS_PER_YEAR};
pub use weights::Weights;
