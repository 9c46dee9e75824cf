//! Risk report assembly and rendering.
//!
//! [`RiskReportBuilder`] orchestrates metrics, factor regression, scenarios
//! and rails into one [`RiskReport`]. Missing optional inputs never fail the
//! build; they show up in-band as degenerate or empty sections.

mod builder;
mod render;

pub use builder::RiskReportBuilder;
pub use render::{render_text, ReportText};

use std::collections::BTreeMap;

use slice_core::types::{Date, PortfolioReturnSeries};

use crate::factor::FactorModel;
use crate::metrics::RiskMetrics;
use crate::rails::RiskRails;
use crate::scenarios::ScenarioResult;

/// Asset-by-asset correlation matrix. `None` where the correlation is
/// undefined.
pub type CorrelationMatrix = BTreeMap<String, BTreeMap<String, Option<f64>>>;

/// Complete risk report for one portfolio.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskReport {
    /// Generation date
    pub as_of: Date,
    /// Portfolio the report describes
    pub portfolio: PortfolioReturnSeries,
    /// Performance and risk statistics
    pub risk_metrics: RiskMetrics,
    /// Rule-based rails
    pub risk_rails: RiskRails,
    /// Fitted factor model
    pub factor_model: Option<FactorModel>,
    /// Scenario impacts, in input order
    pub scenarios: Vec<ScenarioResult>,
    /// Pairwise asset correlations
    pub correlation_matrix: CorrelationMatrix,
    /// Build parameters and input sizes
    pub metadata: BTreeMap<String, String>,
}
