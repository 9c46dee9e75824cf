//! Scenario execution against a fitted factor model.
//!
//! The portfolio impact of a scenario is the linear factor approximation
//! `ΔP ≈ Σ beta_i * shock_i`. A shocked factor the model has no exposure to
//! contributes nothing.

use std::collections::{BTreeMap, HashMap};

use super::shocks::{ScenarioConfig, ScenarioShock};
use crate::factor::FactorModel;

/// Estimated impact of one scenario.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioResult {
    /// Scenario name
    pub name: String,
    /// Scenario description
    pub description: Option<String>,
    /// Shocks that were applied
    pub shocks: Vec<ScenarioShock>,
    /// Sum of factor contributions, in return units
    pub estimated_portfolio_pnl_pct: f64,
    /// Contribution of each shocked factor
    pub factor_contributions: BTreeMap<String, f64>,
}

impl ScenarioResult {
    /// Check if the scenario loses money.
    pub fn is_loss(&self) -> bool {
        self.estimated_portfolio_pnl_pct < 0.0
    }
}

/// Propagates factor shocks through a fitted factor model.
///
/// # Examples
///
/// ```
/// use slice_core::types::Frequency;
/// use slice_risk::factor::{FactorExposure, FactorModel};
/// use slice_risk::scenarios::{ScenarioConfig, ScenarioEngine};
///
/// let model = FactorModel {
///     frequency: Frequency::Daily,
///     r_squared: 0.4,
///     exposures: vec![FactorExposure {
///         factor_name: "RATES".into(),
///         beta: 0.5,
///         t_stat: 3.0,
///         p_value: 0.01,
///     }],
/// };
///
/// let engine = ScenarioEngine::new(&model);
/// let result = engine.run(&ScenarioConfig::named("Rates up").with_shock("RATES", 0.02));
/// assert!((result.estimated_portfolio_pnl_pct - 0.01).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioEngine {
    betas: HashMap<String, f64>,
}

impl ScenarioEngine {
    /// Create an engine from the exposures of a factor model.
    pub fn new(model: &FactorModel) -> Self {
        Self {
            betas: model
                .exposures
                .iter()
                .map(|e| (e.factor_name.clone(), e.beta))
                .collect(),
        }
    }

    /// Beta used for a factor (0.0 if the model has no exposure to it).
    #[inline]
    pub fn beta(&self, factor_name: &str) -> f64 {
        self.betas.get(factor_name).copied().unwrap_or(0.0)
    }

    /// Execute a single scenario.
    ///
    /// A factor shocked twice keeps the last contribution in the breakdown
    /// while both count towards the total.
    pub fn run(&self, scenario: &ScenarioConfig) -> ScenarioResult {
        let mut factor_contributions = BTreeMap::new();
        let mut total = 0.0;

        for shock in &scenario.shocks {
            let contribution = self.beta(&shock.factor_name) * shock.shock;
            factor_contributions.insert(shock.factor_name.clone(), contribution);
            total += contribution;
        }

        ScenarioResult {
            name: scenario.name.clone(),
            description: scenario.description.clone(),
            shocks: scenario.shocks.clone(),
            estimated_portfolio_pnl_pct: total,
            factor_contributions,
        }
    }

    /// Execute all scenarios, preserving input order.
    pub fn run_all(&self, scenarios: &[ScenarioConfig]) -> Vec<ScenarioResult> {
        scenarios.iter().map(|s| self.run(s)).collect()
    }

    /// The scenario with the largest loss.
    ///
    /// Ties resolve to the earliest scenario. `None` for no results.
    pub fn worst_case(results: &[ScenarioResult]) -> Option<&ScenarioResult> {
        results.iter().reduce(|worst, r| {
            if r.estimated_portfolio_pnl_pct < worst.estimated_portfolio_pnl_pct {
                r
            } else {
                worst
            }
        })
    }
}

/// Run every scenario against a factor model.
pub fn run_scenarios(model: &FactorModel, scenarios: &[ScenarioConfig]) -> Vec<ScenarioResult> {
    ScenarioEngine::new(model).run_all(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::FactorExposure;
    use approx::assert_relative_eq;
    use slice_core::types::Frequency;

    fn model(exposures: &[(&str, f64)]) -> FactorModel {
        FactorModel {
            frequency: Frequency::Daily,
            r_squared: 0.5,
            exposures: exposures
                .iter()
                .map(|(name, beta)| FactorExposure {
                    factor_name: name.to_string(),
                    beta: *beta,
                    t_stat: 2.0,
                    p_value: 0.05,
                })
                .collect(),
        }
    }

    #[test]
    fn test_single_factor_example() {
        let results = run_scenarios(
            &model(&[("RATES", 0.5)]),
            &[ScenarioConfig::named("Rates").with_shock("RATES", 0.02)],
        );

        assert_eq!(results.len(), 1);
        assert_relative_eq!(results[0].estimated_portfolio_pnl_pct, 0.01, epsilon = 1e-15);
        assert_eq!(results[0].factor_contributions.len(), 1);
        assert_relative_eq!(results[0].factor_contributions["RATES"], 0.01, epsilon = 1e-15);
    }

    #[test]
    fn test_unknown_factor_contributes_zero() {
        let engine = ScenarioEngine::new(&model(&[("RATES", 0.5)]));
        let result = engine.run(
            &ScenarioConfig::named("Mixed")
                .with_shock("RATES", 0.01)
                .with_shock("OIL", 0.3),
        );

        assert_eq!(result.factor_contributions["OIL"], 0.0);
        assert_relative_eq!(result.estimated_portfolio_pnl_pct, 0.005, epsilon = 1e-15);
    }

    #[test]
    fn test_degenerate_model_gives_zero_pnl() {
        let results = run_scenarios(
            &FactorModel::degenerate(Frequency::Daily),
            &[ScenarioConfig::named("Crash").with_shock("EQUITY", -0.3)],
        );
        assert_eq!(results[0].estimated_portfolio_pnl_pct, 0.0);
        assert_eq!(results[0].shocks.len(), 1);
    }

    #[test]
    fn test_order_preserved() {
        let scenarios: Vec<ScenarioConfig> = ["c", "a", "b"]
            .iter()
            .map(|n| ScenarioConfig::named(*n))
            .collect();
        let names: Vec<String> = run_scenarios(&model(&[]), &scenarios)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_repeated_factor_last_write_wins() {
        let engine = ScenarioEngine::new(&model(&[("RATES", 1.0)]));
        let result = engine.run(
            &ScenarioConfig::named("Twice")
                .with_shock("RATES", 0.01)
                .with_shock("RATES", 0.03),
        );
        assert_relative_eq!(result.factor_contributions["RATES"], 0.03, epsilon = 1e-15);
        assert_relative_eq!(result.estimated_portfolio_pnl_pct, 0.04, epsilon = 1e-15);
    }

    #[test]
    fn test_worst_case() {
        let engine = ScenarioEngine::new(&model(&[("EQUITY", 1.2)]));
        let results = engine.run_all(&[
            ScenarioConfig::named("Rally").with_shock("EQUITY", 0.1),
            ScenarioConfig::named("Crash").with_shock("EQUITY", -0.2),
            ScenarioConfig::named("Dip").with_shock("EQUITY", -0.05),
        ]);

        let worst = ScenarioEngine::worst_case(&results).unwrap();
        assert_eq!(worst.name, "Crash");
        assert!(worst.is_loss());
        assert!(ScenarioEngine::worst_case(&[]).is_none());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(128))]

            #[test]
            fn test_doubling_shocks_doubles_pnl(
                betas in proptest::collection::vec(-2.0f64..2.0, 1..6),
                shocks in proptest::collection::vec(-0.2f64..0.2, 1..6),
            ) {
                let names: Vec<String> = (0..betas.len()).map(|i| format!("F{}", i)).collect();
                let exposures: Vec<(&str, f64)> =
                    names.iter().map(|n| n.as_str()).zip(betas.iter().copied()).collect();
                let engine = ScenarioEngine::new(&model(&exposures));

                let scenario = shocks
                    .iter()
                    .enumerate()
                    .fold(ScenarioConfig::named("S"), |s, (i, shock)| {
                        s.with_shock(format!("F{}", i), *shock)
                    });

                let base = engine.run(&scenario);
                let doubled = engine.run(&scenario.scaled(2.0));

                prop_assert!(
                    (doubled.estimated_portfolio_pnl_pct - 2.0 * base.estimated_portfolio_pnl_pct).abs()
                        <= 1e-12
                );
                for (name, c) in &base.factor_contributions {
                    prop_assert!((doubled.factor_contributions[name] - 2.0 * c).abs() <= 1e-12);
                }
            }
        }
    }
}
