//! Macro regime warnings.

use slice_core::types::{Date, DateTable};

use crate::config::RegimeThresholds;

/// Column holding the 10Y-2Y treasury spread, in basis points.
pub const YIELD_CURVE_COLUMN: &str = "yc_10y_2y";

/// Column holding year-over-year CPI inflation, in percent.
pub const CPI_YOY_COLUMN: &str = "cpi_yoy";

/// Column holding the VIX level.
pub const VIX_COLUMN: &str = "vix";

/// A macro condition that warrants attention.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegimeWarning {
    /// Short regime label
    pub regime_name: String,
    /// Explanation including the observed value
    pub reason: String,
}

/// Most recent macro indicators. Any of them may be absent.
///
/// # Examples
///
/// ```
/// use slice_core::types::{Date, DateTable};
/// use slice_risk::rails::MacroSnapshot;
///
/// let table = DateTable::new(
///     vec!["vix".into(), "cpi_yoy".into()],
///     vec![
///         (Date::from_ymd(2024, 1, 31).unwrap(), vec![Some(14.0), Some(3.1)]),
///         (Date::from_ymd(2024, 2, 29).unwrap(), vec![Some(31.0), None]),
///     ],
/// )
/// .unwrap();
///
/// let snapshot = MacroSnapshot::from_table(&table).unwrap();
/// assert_eq!(snapshot.vix, Some(31.0));
/// assert_eq!(snapshot.cpi_yoy, None);
/// assert_eq!(snapshot.yc_10y_2y, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MacroSnapshot {
    /// Observation date
    pub as_of: Option<Date>,
    /// 10Y-2Y spread (bp)
    pub yc_10y_2y: Option<f64>,
    /// CPI YoY (%)
    pub cpi_yoy: Option<f64>,
    /// VIX level
    pub vix: Option<f64>,
}

impl MacroSnapshot {
    /// Read the latest row of a macro table. `None` for an empty table.
    pub fn from_table(table: &DateTable) -> Option<Self> {
        let (as_of, _) = table.latest_row()?;
        Some(Self {
            as_of: Some(as_of),
            yc_10y_2y: table.latest_value(YIELD_CURVE_COLUMN),
            cpi_yoy: table.latest_value(CPI_YOY_COLUMN),
            vix: table.latest_value(VIX_COLUMN),
        })
    }
}

/// Apply the independent regime rules to a macro snapshot.
///
/// Each rule fires only for an indicator that is present. No snapshot means no
/// warnings.
pub fn compute_regime_warnings(
    snapshot: Option<&MacroSnapshot>,
    thresholds: &RegimeThresholds,
) -> Vec<RegimeWarning> {
    let Some(snapshot) = snapshot else {
        return Vec::new();
    };

    let mut warnings = Vec::new();
    if let Some(yc) = snapshot.yc_10y_2y.filter(|v| *v < thresholds.curve_inversion_below) {
        warnings.push(RegimeWarning {
            regime_name: "Yield Curve Inversion".to_string(),
            reason: format!("10Y-2Y spread inverted ({:.1} bp).", yc),
        });
    }
    if let Some(cpi) = snapshot.cpi_yoy.filter(|v| *v > thresholds.cpi_yoy_above) {
        warnings.push(RegimeWarning {
            regime_name: "High Inflation".to_string(),
            reason: format!("CPI YoY elevated ({:.1}%).", cpi),
        });
    }
    if let Some(vix) = snapshot.vix.filter(|v| *v > thresholds.vix_above) {
        warnings.push(RegimeWarning {
            regime_name: "High Equity Volatility".to_string(),
            reason: format!("VIX elevated ({:.1}).", vix),
        });
    }
    warnings
}
