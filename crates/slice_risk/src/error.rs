//! Risk engine error types.
//!
//! Only caller contract violations surface here. Short histories, zero
//! variance, missing factor or macro data and empty weight overlaps are not
//! errors: they resolve to explicit `None`, `0.0` or empty values inside the
//! computation that detects them.

use slice_core::types::{SeriesError, TableError, WeightsError};
use thiserror::Error;

/// Errors that can occur while building a risk report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    /// A weight names an asset that the asset-return table does not contain.
    #[error("Weight references unknown asset: {0}")]
    UnknownWeightAsset(String),

    /// Malformed return series.
    #[error("Invalid return series: {0}")]
    Series(#[from] SeriesError),

    /// Malformed date-indexed table.
    #[error("Invalid table: {0}")]
    Table(#[from] TableError),

    /// Malformed weight mapping.
    #[error("Invalid weights: {0}")]
    Weights(#[from] WeightsError),

    /// Configuration values outside their valid range.
    #[error("Invalid risk configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    /// The regression design could not be solved.
    #[error("Factor regression failed: {0}")]
    Regression(String),
}

impl RiskError {
    /// Create a regression error
    pub fn regression(msg: impl Into<String>) -> Self {
        Self::Regression(msg.into())
    }
}

/// Result alias for risk engine operations.
pub type RiskResult<T> = Result<T, RiskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unknown_weight_asset() {
        let err = RiskError::UnknownWeightAsset("GLD".to_string());
        assert_eq!(format!("{}", err), "Weight references unknown asset: GLD");
    }

    #[test]
    fn test_error_display_invalid_config() {
        let err = RiskError::InvalidConfig(vec![
            "var_horizon_days must be at least 1".to_string(),
            "correlation_threshold must be in [0, 1]".to_string(),
        ]);
        assert_eq!(
            format!("{}", err),
            "Invalid risk configuration: var_horizon_days must be at least 1; \
             correlation_threshold must be in [0, 1]"
        );
    }

    #[test]
    fn test_error_from_table_error() {
        let err: RiskError = TableError::UnknownColumn("VIX".to_string()).into();
        assert!(err.to_string().contains("Unknown column: VIX"));
    }

    #[test]
    fn test_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(RiskError::regression("singular"));
        assert!(err.to_string().contains("singular"));
    }
}
