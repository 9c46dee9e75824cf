//! Dated return series and the backtest adapter boundary.
//!
//! A [`ReturnSeries`] is the unit every risk computation consumes. It is
//! produced once (by the backtest subsystem or by portfolio aggregation) and
//! read thereafter; the constructor is the only place its invariants are
//! established:
//!
//! - points are in ascending date order
//! - no two points share a date
//! - every value is finite

use super::error::SeriesError;
use super::frequency::Frequency;
use super::time::Date;

/// One scalar observation on a calendar date.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSeriesPoint {
    /// Observation date
    pub date: Date,
    /// Simple period return (or indicator level)
    pub value: f64,
}

impl TimeSeriesPoint {
    /// Creates a new point.
    #[inline]
    pub fn new(date: Date, value: f64) -> Self {
        Self { date, value }
    }
}

/// An identified, date-ordered sequence of period returns.
///
/// # Examples
///
/// ```
/// use slice_core::types::{Date, Frequency, ReturnSeries, TimeSeriesPoint};
///
/// let d1 = Date::from_ymd(2024, 1, 3).unwrap();
/// let d0 = Date::from_ymd(2024, 1, 2).unwrap();
/// let series = ReturnSeries::new(
///     "carry",
///     Frequency::Daily,
///     vec![TimeSeriesPoint::new(d1, 0.02), TimeSeriesPoint::new(d0, 0.01)],
/// )
/// .unwrap();
///
/// assert_eq!(series.dates(), vec![d0, d1]);
/// assert_eq!(series.values(), vec![0.01, 0.02]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawReturnSeries"))]
pub struct ReturnSeries {
    id: String,
    frequency: Frequency,
    returns: Vec<TimeSeriesPoint>,
}

/// Return series of one strategy, as produced by a backtest.
pub type StrategyReturnSeries = ReturnSeries;

/// Return series of an aggregated portfolio.
pub type PortfolioReturnSeries = ReturnSeries;

impl ReturnSeries {
    /// Creates a series, sorting points by date.
    ///
    /// # Errors
    ///
    /// - `SeriesError::DuplicateDate` if two points share a date
    /// - `SeriesError::NonFiniteValue` if a value is NaN or infinite
    pub fn new(
        id: impl Into<String>,
        frequency: Frequency,
        mut returns: Vec<TimeSeriesPoint>,
    ) -> Result<Self, SeriesError> {
        let id = id.into();

        if let Some(bad) = returns.iter().find(|p| !p.value.is_finite()) {
            return Err(SeriesError::NonFiniteValue {
                series: id,
                date: bad.date.to_string(),
                value: bad.value,
            });
        }

        returns.sort_by_key(|p| p.date);
        if let Some(pair) = returns.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(SeriesError::DuplicateDate {
                series: id,
                date: pair[0].date.to_string(),
            });
        }

        Ok(Self {
            id,
            frequency,
            returns,
        })
    }

    /// Creates a series with no observations.
    pub fn empty(id: impl Into<String>, frequency: Frequency) -> Self {
        Self {
            id: id.into(),
            frequency,
            returns: Vec::new(),
        }
    }

    /// Returns the series identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the sampling frequency.
    #[inline]
    pub fn frequency(&self) -> &Frequency {
        &self.frequency
    }

    /// Returns the points in ascending date order.
    #[inline]
    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.returns
    }

    /// Returns the values in date order.
    pub fn values(&self) -> Vec<f64> {
        self.returns.iter().map(|p| p.value).collect()
    }

    /// Returns the dates in ascending order.
    pub fn dates(&self) -> Vec<Date> {
        self.returns.iter().map(|p| p.date).collect()
    }

    /// Returns the number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.returns.len()
    }

    /// Returns true if the series has no observations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    /// Looks up the value on a given date.
    pub fn value_on(&self, date: Date) -> Option<f64> {
        self.returns
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.returns[i].value)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawReturnSeries {
    #[serde(alias = "portfolio_id", alias = "strategy_id")]
    id: String,
    #[serde(default)]
    frequency: Frequency,
    #[serde(default)]
    returns: Vec<TimeSeriesPoint>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawReturnSeries> for ReturnSeries {
    type Error = SeriesError;

    fn try_from(raw: RawReturnSeries) -> Result<Self, Self::Error> {
        ReturnSeries::new(raw.id, raw.frequency, raw.returns)
    }
}

/// Output of one backtest run: a set of strategy return series sharing a
/// frequency.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BacktestResult {
    /// Backtest run identifier
    pub backtest_id: String,
    /// Frequency of every strategy series
    pub frequency: Frequency,
    /// Per-strategy return series
    #[cfg_attr(feature = "serde", serde(default))]
    pub strategies: Vec<StrategyReturnSeries>,
}

impl BacktestResult {
    /// Creates a backtest result.
    pub fn new(
        backtest_id: impl Into<String>,
        frequency: Frequency,
        strategies: Vec<StrategyReturnSeries>,
    ) -> Self {
        Self {
            backtest_id: backtest_id.into(),
            frequency,
            strategies,
        }
    }

    /// Finds a strategy by identifier.
    pub fn strategy(&self, id: &str) -> Option<&StrategyReturnSeries> {
        self.strategies.iter().find(|s| s.id() == id)
    }
}
