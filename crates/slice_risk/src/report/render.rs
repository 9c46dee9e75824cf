//! Deterministic plain-text rendering of a risk report.
//!
//! Sections always appear in the same order. Returns, volatilities, VaR and
//! scenario impacts are printed as signed decimals (`+0.0123` is +1.23%).
//! Undefined statistics print as `n/a`.

use std::fmt;

use super::RiskReport;

/// Display adapter that renders a [`RiskReport`] as text.
pub struct ReportText<'a>(pub &'a RiskReport);

/// Render a report as a stable, fixed-order text summary.
///
/// # Examples
///
/// ```
/// use slice_core::types::{Date, Frequency, ReturnSeries};
/// use slice_risk::report::{render_text, RiskReportBuilder};
///
/// let portfolio = ReturnSeries::empty("book", Frequency::Daily);
/// let report = RiskReportBuilder::new(&portfolio)
///     .as_of(Date::from_ymd(2024, 1, 31).unwrap())
///     .build()
///     .unwrap();
///
/// let text = render_text(&report);
/// assert!(text.starts_with("Risk Report: book as of 2024-01-31"));
/// assert!(text.contains("Sharpe: n/a"));
/// ```
pub fn render_text(report: &RiskReport) -> String {
    ReportText(report).to_string()
}

struct Signed(Option<f64>);

impl fmt::Display for Signed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{:+.4}", v),
            None => f.write_str("n/a"),
        }
    }
}

struct Ratio(Option<f64>);

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{:.2}", v),
            None => f.write_str("n/a"),
        }
    }
}

fn write_map<'m>(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    entries: impl Iterator<Item = (&'m String, &'m f64)>,
    value: fn(f64) -> String,
) -> fmt::Result {
    let parts: Vec<String> = entries.map(|(k, v)| format!("{}={}", k, value(*v))).collect();
    if parts.is_empty() {
        writeln!(f, "  {}: none", label)
    } else {
        writeln!(f, "  {}: {}", label, parts.join(", "))
    }
}

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let metrics = &report.risk_metrics;
        let rails = &report.risk_rails;

        writeln!(
            f,
            "Risk Report: {} as of {}",
            report.portfolio.id(),
            report.as_of
        )?;
        writeln!(
            f,
            "Frequency: {} | Observations: {}",
            metrics.frequency,
            report.portfolio.len()
        )?;

        writeln!(f)?;
        writeln!(f, "Metrics:")?;
        writeln!(f, "  Total Return: {}", Signed(Some(metrics.total_return)))?;
        writeln!(f, "  CAGR: {}", Signed(metrics.cagr))?;
        writeln!(f, "  Annualized Vol: {}", Signed(Some(metrics.annualized_vol)))?;
        writeln!(f, "  Sharpe: {}", Ratio(metrics.sharpe))?;
        writeln!(f, "  Max Drawdown: {}", Signed(Some(metrics.max_drawdown)))?;
        write_map(f, "Rolling Vol", metrics.rolling_vol.iter(), |v| {
            Signed(Some(v)).to_string()
        })?;
        write_map(f, "Rolling Sharpe", metrics.rolling_sharpe.iter(), |v| {
            Ratio(Some(v)).to_string()
        })?;

        writeln!(f)?;
        match &report.factor_model {
            Some(model) if !model.exposures.is_empty() => {
                writeln!(f, "Factor Model (R^2 {:.4}):", model.r_squared)?;
                for e in &model.exposures {
                    writeln!(
                        f,
                        "  {}: beta {:+.4}, t {:.2}, p {:.4}",
                        e.factor_name, e.beta, e.t_stat, e.p_value
                    )?;
                }
            }
            _ => writeln!(f, "Factor Model: none")?,
        }

        writeln!(f)?;
        writeln!(f, "Scenarios:")?;
        if report.scenarios.is_empty() {
            writeln!(f, "  none")?;
        }
        for s in &report.scenarios {
            let contributions: Vec<String> = s
                .factor_contributions
                .iter()
                .map(|(k, v)| format!("{} {:+.4}", k, v))
                .collect();
            writeln!(
                f,
                "  {}: {} [{}]",
                s.name,
                Signed(Some(s.estimated_portfolio_pnl_pct)),
                contributions.join(", ")
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Risk Rails:")?;
        writeln!(f, "  VaR 95%: {}", Signed(rails.var_1m_95))?;
        writeln!(f, "  VaR 99%: {}", Signed(rails.var_1m_99))?;
        if rails.concentration_flags.is_empty() {
            writeln!(f, "  Concentration: none")?;
        }
        for flag in &rails.concentration_flags {
            writeln!(
                f,
                "  Concentration: {} {:+.4} (|w| > {:.2})",
                flag.asset, flag.weight, flag.threshold
            )?;
        }
        if rails.correlation_cluster_flags.is_empty() {
            writeln!(f, "  Correlation Clusters: none")?;
        }
        for cluster in &rails.correlation_cluster_flags {
            writeln!(
                f,
                "  Correlation Cluster: [{}] {}",
                cluster.cluster_assets.join(", "),
                cluster.comment
            )?;
        }
        if rails.regime_warnings.is_empty() {
            writeln!(f, "  Regime Warnings: none")?;
        }
        for warning in &rails.regime_warnings {
            writeln!(f, "  Regime Warning: {} - {}", warning.regime_name, warning.reason)?;
        }
        Ok(())
    }
}
