//! Weighted aggregation of component return series into a portfolio.
//!
//! Components are laid out on the union of their dates. A component with no
//! observation on a date contributes a zero return that day. Weights for
//! components that are not supplied are ignored, and supplied components
//! without a weight are left out.

use slice_core::types::{
    BacktestResult, DateTable, Frequency, PortfolioReturnSeries, ReturnSeries, Weights,
};

use crate::error::RiskResult;

/// Aggregate weighted component series into one portfolio series.
///
/// Returns an empty series when no component has a weight.
///
/// # Errors
///
/// - `RiskError::Table` if two components share an identifier
/// - `RiskError::Series` if the weighted sum produces a non-finite value
///
/// # Examples
///
/// ```
/// use slice_core::types::{Date, Frequency, ReturnSeries, TimeSeriesPoint, Weights};
/// use slice_risk::aggregator::aggregate_portfolio;
///
/// let d = Date::from_ymd(2024, 1, 2).unwrap();
/// let a = ReturnSeries::new("A", Frequency::Daily, vec![TimeSeriesPoint::new(d, 0.02)]).unwrap();
/// let b = ReturnSeries::new("B", Frequency::Daily, vec![TimeSeriesPoint::new(d, -0.01)]).unwrap();
/// let weights = Weights::new([("A", 0.5), ("B", 0.5)]).unwrap();
///
/// let portfolio = aggregate_portfolio([&a, &b], &weights, "P", Frequency::Daily).unwrap();
/// assert_eq!(portfolio.values(), vec![0.005]);
/// ```
pub fn aggregate_portfolio<'a, I>(
    components: I,
    weights: &Weights,
    portfolio_id: &str,
    frequency: Frequency,
) -> RiskResult<PortfolioReturnSeries>
where
    I: IntoIterator<Item = &'a ReturnSeries>,
{
    let selected: Vec<&ReturnSeries> = components
        .into_iter()
        .filter(|s| weights.contains(s.id()))
        .collect();
    if selected.is_empty() {
        tracing::debug!(portfolio_id, "no weighted components to aggregate");
        return Ok(ReturnSeries::empty(portfolio_id, frequency));
    }

    let table = DateTable::from_series(selected)?;
    let overlap = Weights::new(
        weights
            .iter()
            .filter(|(id, _)| table.column_index(id).is_some()),
    )?;

    let points = table.weighted_row_sum(&overlap)?;
    Ok(ReturnSeries::new(portfolio_id, frequency, points)?)
}

/// Aggregate the weighted strategies of a backtest.
///
/// The portfolio inherits the backtest frequency.
///
/// # Errors
///
/// See [`aggregate_portfolio`].
pub fn aggregate_from_backtest(
    backtest: &BacktestResult,
    weights: &Weights,
    portfolio_id: &str,
) -> RiskResult<PortfolioReturnSeries> {
    aggregate_portfolio(
        &backtest.strategies,
        weights,
        portfolio_id,
        backtest.frequency.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RiskError;
    use slice_core::types::{Date, TimeSeriesPoint};

    fn d(day: u32) -> Date {
        Date::from_ymd(2024, 2, day).unwrap()
    }

    fn series(id: &str, points: &[(u32, f64)]) -> ReturnSeries {
        ReturnSeries::new(
            id,
            Frequency::Daily,
            points
                .iter()
                .map(|(day, v)| TimeSeriesPoint::new(d(*day), *v))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_dates_contribute_zero() {
        let a = series("A", &[(1, 0.01), (2, 0.02)]);
        let b = series("B", &[(2, 0.04), (3, -0.02)]);
        let weights = Weights::new([("A", 0.5), ("B", 0.5)]).unwrap();

        let portfolio = aggregate_portfolio([&a, &b], &weights, "P", Frequency::Daily).unwrap();

        assert_eq!(portfolio.dates(), vec![d(1), d(2), d(3)]);
        assert_eq!(portfolio.values(), vec![0.005, 0.03, -0.01]);
        assert_eq!(portfolio.id(), "P");
    }

    #[test]
    fn test_unweighted_components_excluded() {
        let a = series("A", &[(1, 0.01)]);
        let b = series("B", &[(5, 0.5)]);
        let weights = Weights::new([("A", 1.0), ("GHOST", 0.3)]).unwrap();

        let portfolio = aggregate_portfolio([&a, &b], &weights, "P", Frequency::Daily).unwrap();
        assert_eq!(portfolio.dates(), vec![d(1)]);
        assert_eq!(portfolio.values(), vec![0.01]);
    }

    #[test]
    fn test_no_overlap_yields_empty_series() {
        let a = series("A", &[(1, 0.01)]);
        let weights = Weights::new([("B", 1.0)]).unwrap();

        let portfolio = aggregate_portfolio([&a], &weights, "P", Frequency::Weekly).unwrap();
        assert!(portfolio.is_empty());
        assert_eq!(portfolio.frequency(), &Frequency::Weekly);

        let none: [&ReturnSeries; 0] = [];
        assert!(aggregate_portfolio(none, &weights, "P", Frequency::Daily)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_duplicate_component_ids_rejected() {
        let a = series("A", &[(1, 0.01)]);
        let a2 = series("A", &[(2, 0.01)]);
        let weights = Weights::new([("A", 1.0)]).unwrap();

        let err = aggregate_portfolio([&a, &a2], &weights, "P", Frequency::Daily).unwrap_err();
        assert!(matches!(err, RiskError::Table(_)));
    }

    #[test]
    fn test_from_backtest_uses_backtest_frequency() {
        let backtest = BacktestResult::new(
            "bt-1",
            Frequency::Monthly,
            vec![series("MOM", &[(1, 0.02)]), series("CARRY", &[(1, 0.01)])],
        );
        let weights = Weights::new([("CARRY", 1.0)]).unwrap();

        let portfolio = aggregate_from_backtest(&backtest, &weights, "book").unwrap();
        assert_eq!(portfolio.frequency(), &Frequency::Monthly);
        assert_eq!(portfolio.values(), vec![0.01]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(128))]

            #[test]
            fn test_aggregation_is_linear(
                pairs in proptest::collection::vec((-0.1f64..0.1, -0.1f64..0.1), 1..60),
                w_a in 0.0f64..1.0,
            ) {
                let w_b = 1.0 - w_a;
                let start = Date::from_ymd(2023, 1, 1).unwrap();
                let a = ReturnSeries::new(
                    "A",
                    Frequency::Daily,
                    pairs.iter().enumerate()
                        .map(|(i, (x, _))| TimeSeriesPoint::new(start.add_days(i as i64), *x))
                        .collect(),
                ).unwrap();
                let b = ReturnSeries::new(
                    "B",
                    Frequency::Daily,
                    pairs.iter().enumerate()
                        .map(|(i, (_, y))| TimeSeriesPoint::new(start.add_days(i as i64), *y))
                        .collect(),
                ).unwrap();
                let weights = Weights::new([("A", w_a), ("B", w_b)]).unwrap();

                let portfolio = aggregate_portfolio([&a, &b], &weights, "P", Frequency::Daily).unwrap();

                prop_assert_eq!(portfolio.len(), pairs.len());
                for (value, (x, y)) in portfolio.values().iter().zip(&pairs) {
                    prop_assert_eq!(*value, w_a * x + w_b * y);
                }
            }
        }
    }
}
