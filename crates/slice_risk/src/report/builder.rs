//! Report orchestration.

use std::collections::BTreeMap;

use slice_core::types::{Date, DateTable, PortfolioReturnSeries, Weights};

use super::{CorrelationMatrix, RiskReport};
use crate::config::RiskConfig;
use crate::error::RiskResult;
use crate::factor::{run_factor_regression, FactorModel};
use crate::metrics::{compute_risk_metrics, RiskMetrics};
use crate::rails::{compute_risk_rails, weighted_portfolio_returns, RiskRails};
use crate::scenarios::{run_scenarios, ScenarioConfig, ScenarioResult};

/// Builder for a [`RiskReport`].
///
/// Only the portfolio series is required. Sections whose inputs are missing
/// are emitted in their degenerate form:
///
/// - no factor data: zero-exposure factor model
/// - no scenarios: empty scenario list
/// - no asset returns or no weights: empty rails and correlation matrix
///
/// # Examples
///
/// ```
/// use slice_core::types::{Date, Frequency, ReturnSeries, TimeSeriesPoint};
/// use slice_risk::report::RiskReportBuilder;
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let points = (0..90)
///     .map(|i| TimeSeriesPoint::new(start.add_days(i), if i % 2 == 0 { 0.01 } else { -0.004 }))
///     .collect();
/// let portfolio = ReturnSeries::new("book", Frequency::Daily, points).unwrap();
///
/// let report = RiskReportBuilder::new(&portfolio)
///     .as_of(Date::from_ymd(2024, 4, 1).unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(report.as_of.to_string(), "2024-04-01");
/// assert!(report.risk_metrics.sharpe.is_some());
/// assert_eq!(report.factor_model.unwrap().r_squared, 0.0);
/// assert!(report.scenarios.is_empty());
/// assert!(report.correlation_matrix.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct RiskReportBuilder<'a> {
    portfolio: &'a PortfolioReturnSeries,
    asset_returns: Option<&'a DateTable>,
    weights: Option<&'a Weights>,
    factor_data: Option<&'a DateTable>,
    scenarios: Option<&'a [ScenarioConfig]>,
    macro_data: Option<&'a DateTable>,
    config: RiskConfig,
    as_of: Option<Date>,
    parallel: bool,
}

impl<'a> RiskReportBuilder<'a> {
    /// Start a report for a portfolio series.
    pub fn new(portfolio: &'a PortfolioReturnSeries) -> Self {
        Self {
            portfolio,
            asset_returns: None,
            weights: None,
            factor_data: None,
            scenarios: None,
            macro_data: None,
            config: RiskConfig::default(),
            as_of: None,
            parallel: true,
        }
    }

    /// Sets the per-asset return table used by the rails.
    #[inline]
    pub fn asset_returns(mut self, asset_returns: &'a DateTable) -> Self {
        self.asset_returns = Some(asset_returns);
        self
    }

    /// Sets the position weights used by the rails.
    #[inline]
    pub fn weights(mut self, weights: &'a Weights) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Sets the factor return table for the regression.
    #[inline]
    pub fn factor_data(mut self, factor_data: &'a DateTable) -> Self {
        self.factor_data = Some(factor_data);
        self
    }

    /// Sets the scenarios to evaluate.
    #[inline]
    pub fn scenarios(mut self, scenarios: &'a [ScenarioConfig]) -> Self {
        self.scenarios = Some(scenarios);
        self
    }

    /// Sets the macro indicator table for regime warnings.
    #[inline]
    pub fn macro_data(mut self, macro_data: &'a DateTable) -> Self {
        self.macro_data = Some(macro_data);
        self
    }

    /// Sets the risk configuration.
    #[inline]
    pub fn config(mut self, config: RiskConfig) -> Self {
        self.config = config;
        self
    }

    /// Stamps the report with a fixed date instead of today.
    #[inline]
    pub fn as_of(mut self, as_of: Date) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Computes the report sections concurrently (default) or in sequence.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builds the report.
    ///
    /// # Errors
    ///
    /// - `RiskError::InvalidConfig` if the configuration is invalid
    /// - `RiskError::UnknownWeightAsset` if a weight names an asset missing
    ///   from the asset-return table
    /// - `RiskError::Regression` if the factor regression cannot be solved
    pub fn build(self) -> RiskResult<RiskReport> {
        self.config.validate()?;

        let (risk_metrics, (factor_section, rails_section)) = if self.parallel {
            rayon::join(
                || self.metrics_section(),
                || rayon::join(|| self.factor_section(), || self.rails_section()),
            )
        } else {
            (
                self.metrics_section(),
                (self.factor_section(), self.rails_section()),
            )
        };
        let (factor_model, scenarios) = factor_section?;
        let (risk_rails, correlation_matrix) = rails_section?;

        let as_of = self.as_of.unwrap_or_else(Date::today);
        let metadata = self.metadata();

        tracing::info!(
            portfolio = self.portfolio.id(),
            %as_of,
            observations = self.portfolio.len(),
            exposures = factor_model.exposures.len(),
            scenarios = scenarios.len(),
            concentration_flags = risk_rails.concentration_flags.len(),
            clusters = risk_rails.correlation_cluster_flags.len(),
            regime_warnings = risk_rails.regime_warnings.len(),
            "risk report built"
        );

        Ok(RiskReport {
            as_of,
            portfolio: self.portfolio.clone(),
            risk_metrics,
            risk_rails,
            factor_model: Some(factor_model),
            scenarios,
            correlation_matrix,
            metadata,
        })
    }

    fn metrics_section(&self) -> RiskMetrics {
        compute_risk_metrics(
            self.portfolio,
            self.config.risk_free_rate_annual,
            &self.config.rolling_windows,
        )
    }

    fn factor_section(&self) -> RiskResult<(FactorModel, Vec<ScenarioResult>)> {
        let factor_model = match self.factor_data.filter(|f| !f.is_empty()) {
            Some(factors) => run_factor_regression(self.portfolio, factors)?,
            None => {
                tracing::debug!("no factor data, using degenerate factor model");
                FactorModel::degenerate(self.portfolio.frequency().clone())
            }
        };

        let scenarios = match self.scenarios.filter(|s| !s.is_empty()) {
            Some(configs) => run_scenarios(&factor_model, configs),
            None => Vec::new(),
        };
        Ok((factor_model, scenarios))
    }

    fn rails_section(&self) -> RiskResult<(RiskRails, CorrelationMatrix)> {
        let (asset_returns, weights) = match (
            self.asset_returns.filter(|t| !t.is_empty()),
            self.weights.filter(|w| !w.is_empty()),
        ) {
            (Some(asset_returns), Some(weights)) => (asset_returns, weights),
            _ => {
                tracing::debug!("asset returns or weights missing, rails left empty");
                return Ok((RiskRails::empty(), CorrelationMatrix::new()));
            }
        };

        let portfolio_returns = weighted_portfolio_returns(asset_returns, weights)?;
        let rails = compute_risk_rails(
            weights,
            asset_returns,
            Some(portfolio_returns.as_slice()),
            self.macro_data,
            &self.config.rails,
        )?;

        Ok((rails, correlation_matrix(asset_returns)))
    }

    fn metadata(&self) -> BTreeMap<String, String> {
        let config = &self.config;
        let windows: Vec<String> = config.rolling_windows.iter().map(|w| w.to_string()).collect();
        let n_cols = |t: Option<&DateTable>| t.map_or(0, DateTable::n_cols).to_string();

        [
            ("engine_version", crate::VERSION.to_string()),
            ("risk_free_rate_annual", config.risk_free_rate_annual.to_string()),
            ("rolling_windows", windows.join(",")),
            (
                "concentration_threshold",
                config.rails.concentration_threshold.to_string(),
            ),
            (
                "correlation_threshold",
                config.rails.correlation_threshold.to_string(),
            ),
            ("var_horizon_days", config.rails.var_horizon_days.to_string()),
            ("observations", self.portfolio.len().to_string()),
            ("asset_count", n_cols(self.asset_returns)),
            ("factor_count", n_cols(self.factor_data)),
            (
                "scenario_count",
                self.scenarios.map_or(0, <[ScenarioConfig]>::len).to_string(),
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }
}

fn correlation_matrix(asset_returns: &DateTable) -> CorrelationMatrix {
    let names = asset_returns.column_names();
    asset_returns
        .correlation_matrix()
        .into_iter()
        .zip(names)
        .map(|(row, name)| (name.clone(), names.iter().cloned().zip(row).collect()))
        .collect()
}
