//! Risk report configuration.
//!
//! Every threshold the engine applies is a parameter here with its documented
//! default value; nothing downstream hard-codes a calibration.

use slice_core::math::returns::DEFAULT_ROLLING_WINDOWS;

use crate::error::RiskError;

/// Default absolute weight above which a position is flagged.
pub const DEFAULT_CONCENTRATION_THRESHOLD: f64 = 0.2;

/// Default absolute correlation at which two assets are linked into a cluster.
pub const DEFAULT_CORRELATION_THRESHOLD: f64 = 0.8;

/// Default VaR horizon in periods (one trading month).
pub const DEFAULT_VAR_HORIZON_DAYS: usize = 21;

/// Thresholds for macro regime warnings.
///
/// # Examples
///
/// ```
/// use slice_risk::config::RegimeThresholds;
///
/// let t = RegimeThresholds::default();
/// assert_eq!(t.curve_inversion_below, 0.0);
/// assert_eq!(t.cpi_yoy_above, 4.0);
/// assert_eq!(t.vix_above, 25.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegimeThresholds {
    /// 10Y-2Y spread strictly below this value is an inversion
    pub curve_inversion_below: f64,
    /// YoY CPI strictly above this value is high inflation
    pub cpi_yoy_above: f64,
    /// VIX strictly above this value is high equity volatility
    pub vix_above: f64,
}

impl Default for RegimeThresholds {
    fn default() -> Self {
        Self {
            curve_inversion_below: 0.0,
            cpi_yoy_above: 4.0,
            vix_above: 25.0,
        }
    }
}

/// Parameters of the rule-based risk rails.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RailsConfig {
    /// Flag positions with `|weight|` strictly above this value
    pub concentration_threshold: f64,
    /// Link assets with `|corr|` at or above this value
    pub correlation_threshold: f64,
    /// Horizon of the compounded returns behind VaR, in periods
    pub var_horizon_days: usize,
    /// Lower-tail probability of the 95% VaR
    pub var_alpha_95: f64,
    /// Lower-tail probability of the 99% VaR
    pub var_alpha_99: f64,
    /// Macro regime thresholds
    pub regime: RegimeThresholds,
}

impl Default for RailsConfig {
    fn default() -> Self {
        Self {
            concentration_threshold: DEFAULT_CONCENTRATION_THRESHOLD,
            correlation_threshold: DEFAULT_CORRELATION_THRESHOLD,
            var_horizon_days: DEFAULT_VAR_HORIZON_DAYS,
            var_alpha_95: 0.05,
            var_alpha_99: 0.01,
            regime: RegimeThresholds::default(),
        }
    }
}

/// Top-level configuration of a risk report build.
///
/// # Examples
///
/// ```
/// use slice_risk::config::RiskConfig;
///
/// let config = RiskConfig::default();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.rolling_windows, vec![21, 63, 252]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RiskConfig {
    /// Annual risk-free rate used for Sharpe ratios
    pub risk_free_rate_annual: f64,
    /// Trailing windows (in periods) for rolling volatility and Sharpe
    pub rolling_windows: Vec<usize>,
    /// Risk rail parameters
    pub rails: RailsConfig,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            risk_free_rate_annual: 0.0,
            rolling_windows: DEFAULT_ROLLING_WINDOWS.to_vec(),
            rails: RailsConfig::default(),
        }
    }
}

impl RiskConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InvalidConfig` listing every violated constraint.
    pub fn validate(&self) -> Result<(), RiskError> {
        let mut errors = Vec::new();

        if !self.risk_free_rate_annual.is_finite() || self.risk_free_rate_annual <= -1.0 {
            errors.push(format!(
                "risk_free_rate_annual {} must be finite and greater than -1",
                self.risk_free_rate_annual
            ));
        }
        if self.rolling_windows.contains(&0) {
            errors.push("rolling_windows must not contain 0".to_string());
        }

        let rails = &self.rails;
        if !(rails.concentration_threshold >= 0.0 && rails.concentration_threshold.is_finite()) {
            errors.push(format!(
                "concentration_threshold {} must be a non-negative number",
                rails.concentration_threshold
            ));
        }
        if !(0.0..=1.0).contains(&rails.correlation_threshold) {
            errors.push(format!(
                "correlation_threshold {} must be in [0, 1]",
                rails.correlation_threshold
            ));
        }
        if rails.var_horizon_days == 0 {
            errors.push("var_horizon_days must be at least 1".to_string());
        }
        for (name, alpha) in [
            ("var_alpha_95", rails.var_alpha_95),
            ("var_alpha_99", rails.var_alpha_99),
        ] {
            if !(alpha > 0.0 && alpha < 1.0) {
                errors.push(format!("{} {} must be in (0, 1)", name, alpha));
            }
        }

        let regime = &rails.regime;
        if ![regime.curve_inversion_below, regime.cpi_yoy_above, regime.vix_above]
            .iter()
            .all(|v| v.is_finite())
        {
            errors.push("regime thresholds must be finite".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(RiskError::InvalidConfig(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RiskConfig::default();
        assert_eq!(config.risk_free_rate_annual, 0.0);
        assert_eq!(config.rails.concentration_threshold, 0.2);
        assert_eq!(config.rails.correlation_threshold, 0.8);
        assert_eq!(config.rails.var_horizon_days, 21);
        assert_eq!(config.rails.var_alpha_95, 0.05);
        assert_eq!(config.rails.var_alpha_99, 0.01);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = RiskConfig::default();
        config.rails.var_horizon_days = 0;
        config.rails.correlation_threshold = 1.5;
        config.rolling_windows = vec![21, 0];

        match config.validate() {
            Err(RiskError::InvalidConfig(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_alpha_out_of_range() {
        let mut config = RiskConfig::default();
        config.rails.var_alpha_99 = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan_rate() {
        let config = RiskConfig {
            risk_free_rate_annual: f64::NAN,
            ..RiskConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
