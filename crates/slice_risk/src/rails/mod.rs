//! Rule-based risk rails.
//!
//! Four independent checks combined into one [`RiskRails`]:
//!
//! | Check | Input | Output |
//! |-------|-------|--------|
//! | Concentration | weights | [`ConcentrationFlag`] per oversized position |
//! | Correlation | asset returns | [`CorrelationClusterFlag`] per connected cluster |
//! | VaR | portfolio returns | 95% / 99% horizon quantiles |
//! | Regime | latest macro row | [`RegimeWarning`] per triggered rule |

mod concentration;
mod correlation;
mod regime;

pub use concentration::{compute_concentration_flags, ConcentrationFlag};
pub use correlation::{
    compute_correlation_cluster_flags, find_correlation_clusters, CorrelationClusterFlag,
};
pub use regime::{
    compute_regime_warnings, MacroSnapshot, RegimeWarning, CPI_YOY_COLUMN, VIX_COLUMN,
    YIELD_CURVE_COLUMN,
};

use slice_core::math::returns;
use slice_core::types::{DateTable, TableError, Weights};

use crate::config::RailsConfig;
use crate::error::{RiskError, RiskResult};

/// Combined output of the risk rails.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskRails {
    /// Oversized positions
    pub concentration_flags: Vec<ConcentrationFlag>,
    /// Highly correlated asset groups
    pub correlation_cluster_flags: Vec<CorrelationClusterFlag>,
    /// 95% historical VaR over the configured horizon
    pub var_1m_95: Option<f64>,
    /// 99% historical VaR over the configured horizon
    pub var_1m_99: Option<f64>,
    /// Triggered macro regime rules
    pub regime_warnings: Vec<RegimeWarning>,
}

impl RiskRails {
    /// Rails with no flags, no VaR and no warnings.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if nothing was flagged and no VaR is available.
    pub fn is_empty(&self) -> bool {
        self.concentration_flags.is_empty()
            && self.correlation_cluster_flags.is_empty()
            && self.var_1m_95.is_none()
            && self.var_1m_99.is_none()
            && self.regime_warnings.is_empty()
    }
}

/// Historical VaR of portfolio returns with the configured horizon and tails.
pub fn compute_var(portfolio_returns: &[f64], config: &RailsConfig) -> (Option<f64>, Option<f64>) {
    returns::historical_var(
        portfolio_returns,
        config.var_horizon_days,
        config.var_alpha_95,
        config.var_alpha_99,
    )
}

/// Weighted row sum of asset returns, one value per table row.
///
/// # Errors
///
/// `RiskError::UnknownWeightAsset` if a weight names an asset the table does
/// not contain.
pub fn weighted_portfolio_returns(
    asset_returns: &DateTable,
    weights: &Weights,
) -> RiskResult<Vec<f64>> {
    asset_returns
        .weighted_row_sum(weights)
        .map(|points| points.into_iter().map(|p| p.value).collect())
        .map_err(|e| match e {
            TableError::UnknownColumn(asset) => RiskError::UnknownWeightAsset(asset),
            other => RiskError::Table(other),
        })
}

/// Evaluate all rails.
///
/// `portfolio_returns` feeds the VaR check; when `None` it is derived as the
/// weighted row sum of `asset_returns`.
///
/// # Errors
///
/// `RiskError::UnknownWeightAsset` when portfolio returns must be derived and
/// a weight names an asset missing from `asset_returns`.
///
/// # Examples
///
/// ```
/// use slice_core::types::{DateTable, Weights};
/// use slice_risk::config::RailsConfig;
/// use slice_risk::rails::compute_risk_rails;
///
/// let weights = Weights::new([("A", 0.5), ("B", 0.3), ("C", 0.2)]).unwrap();
/// let rails = compute_risk_rails(
///     &weights,
///     &DateTable::default(),
///     Some(&[] as &[f64]),
///     None,
///     &RailsConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(rails.concentration_flags.len(), 2);
/// assert!(rails.correlation_cluster_flags.is_empty());
/// assert_eq!(rails.var_1m_95, None);
/// ```
pub fn compute_risk_rails(
    weights: &Weights,
    asset_returns: &DateTable,
    portfolio_returns: Option<&[f64]>,
    macro_data: Option<&DateTable>,
    config: &RailsConfig,
) -> RiskResult<RiskRails> {
    let derived;
    let portfolio_returns = match portfolio_returns {
        Some(r) => r,
        None => {
            derived = weighted_portfolio_returns(asset_returns, weights)?;
            derived.as_slice()
        }
    };

    let (var_1m_95, var_1m_99) = compute_var(portfolio_returns, config);
    let snapshot = macro_data.and_then(MacroSnapshot::from_table);

    Ok(RiskRails {
        concentration_flags: compute_concentration_flags(weights, config.concentration_threshold),
        correlation_cluster_flags: compute_correlation_cluster_flags(
            asset_returns,
            config.correlation_threshold,
        ),
        var_1m_95,
        var_1m_99,
        regime_warnings: compute_regime_warnings(snapshot.as_ref(), &config.regime),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use slice_core::types::Date;

    fn asset_table(n: usize) -> DateTable {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let rows = (0..n)
            .map(|i| {
                let a = ((i * 7 % 13) as f64 - 6.0) / 500.0;
                let b = ((i * 3 % 11) as f64 - 5.0) / 400.0;
                (start.add_days(i as i64), vec![Some(a), Some(b)])
            })
            .collect();
        DateTable::new(vec!["A".into(), "B".into()], rows).unwrap()
    }

    #[test]
    fn test_empty_rails() {
        let rails = RiskRails::empty();
        assert!(rails.is_empty());
    }

    #[test]
    fn test_var_uses_derived_portfolio_returns() {
        let table = asset_table(80);
        let weights = Weights::new([("A", 0.6), ("B", 0.4)]).unwrap();
        let config = RailsConfig::default();

        let rails = compute_risk_rails(&weights, &table, None, None, &config).unwrap();
        let derived = weighted_portfolio_returns(&table, &weights).unwrap();
        let (v95, v99) = returns::historical_var(&derived, 21, 0.05, 0.01);

        assert_relative_eq!(rails.var_1m_95.unwrap(), v95.unwrap());
        assert_relative_eq!(rails.var_1m_99.unwrap(), v99.unwrap());
        assert!(rails.var_1m_99 <= rails.var_1m_95);
    }

    #[test]
    fn test_supplied_portfolio_returns_take_precedence() {
        let table = asset_table(30);
        let weights = Weights::new([("A", 1.0)]).unwrap();
        let supplied = vec![0.001; 25];

        let rails = compute_risk_rails(&weights, &table, Some(supplied.as_slice()), None, &RailsConfig::default())
            .unwrap();
        assert_relative_eq!(
            rails.var_1m_95.unwrap(),
            1.001_f64.powi(21) - 1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_short_history_has_no_var() {
        let table = asset_table(10);
        let weights = Weights::new([("A", 0.5), ("B", 0.5)]).unwrap();
        let rails = compute_risk_rails(&weights, &table, None, None, &RailsConfig::default()).unwrap();
        assert_eq!((rails.var_1m_95, rails.var_1m_99), (None, None));
    }

    #[test]
    fn test_unknown_weight_asset_is_an_error() {
        let table = asset_table(30);
        let weights = Weights::new([("A", 0.5), ("GLD", 0.5)]).unwrap();
        let err = compute_risk_rails(&weights, &table, None, None, &RailsConfig::default()).unwrap_err();
        assert_eq!(err, RiskError::UnknownWeightAsset("GLD".to_string()));
    }

    #[test]
    fn test_macro_table_drives_regime_warnings() {
        let macro_data = DateTable::new(
            vec![VIX_COLUMN.into(), YIELD_CURVE_COLUMN.into()],
            vec![(Date::from_ymd(2024, 6, 28).unwrap(), vec![Some(30.0), Some(-12.5)])],
        )
        .unwrap();
        let weights = Weights::new([("A", 0.1)]).unwrap();

        let rails = compute_risk_rails(
            &weights,
            &asset_table(5),
            None,
            Some(&macro_data),
            &RailsConfig::default(),
        )
        .unwrap();
        assert_eq!(rails.regime_warnings.len(), 2);
        assert_eq!(rails.regime_warnings[0].regime_name, "Yield Curve Inversion");
    }
}
