//! Linear factor regression of portfolio returns.
//!
//! Ordinary least squares of the portfolio return on each factor column plus
//! an intercept. The design matrix is solved through its singular value
//! decomposition, so perfectly collinear factors still produce a
//! (minimum-norm) fit instead of failing. Singular values are cut off
//! relative to the largest one, so the fit does not depend on the absolute
//! scale of the factors.

use nalgebra::{DMatrix, DVector};
use statrs::distribution::{ContinuousCDF, StudentsT};

use slice_core::types::{DateTable, Frequency, PortfolioReturnSeries};

use crate::error::{RiskError, RiskResult};

/// Estimated sensitivity of the portfolio to one factor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactorExposure {
    /// Factor column name
    pub factor_name: String,
    /// Regression coefficient
    pub beta: f64,
    /// Coefficient divided by its standard error
    pub t_stat: f64,
    /// Two-sided p-value of the t statistic
    pub p_value: f64,
}

/// Fitted factor model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactorModel {
    /// Frequency of the regressed returns
    pub frequency: Frequency,
    /// Coefficient of determination
    pub r_squared: f64,
    /// One exposure per factor column, in column order
    pub exposures: Vec<FactorExposure>,
}

impl FactorModel {
    /// Model with no exposures, used when there is nothing to regress on.
    pub fn degenerate(frequency: Frequency) -> Self {
        Self {
            frequency,
            r_squared: 0.0,
            exposures: Vec::new(),
        }
    }

    /// Returns true if the model carries no exposures.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.exposures.is_empty()
    }

    /// Looks up the beta of a factor.
    pub fn beta(&self, factor_name: &str) -> Option<f64> {
        self.exposures
            .iter()
            .find(|e| e.factor_name == factor_name)
            .map(|e| e.beta)
    }
}

/// Regress portfolio returns on the factor columns of a date-indexed table.
///
/// The series and the table are inner-joined on date and any row with a
/// missing factor value is dropped. The model is degenerate (no exposures,
/// `r_squared == 0`) when the table has no columns, nothing aligns, or fewer
/// than `factors + 2` rows remain.
///
/// # Errors
///
/// `RiskError::Regression` if the design matrix cannot be solved.
///
/// # Examples
///
/// ```
/// use slice_core::types::{Date, DateTable, Frequency, ReturnSeries, TimeSeriesPoint};
/// use slice_risk::factor::run_factor_regression;
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let factor: Vec<f64> = (0..40).map(|i| ((i * 7 % 13) as f64 - 6.0) / 100.0).collect();
/// let noise: Vec<f64> = (0..40).map(|i| ((i * 5 % 11) as f64 - 5.0) / 10_000.0).collect();
///
/// let points = (0..40)
///     .map(|i| TimeSeriesPoint::new(start.add_days(i as i64), 0.5 * factor[i] + noise[i]))
///     .collect();
/// let portfolio = ReturnSeries::new("P", Frequency::Daily, points).unwrap();
/// let factors = DateTable::new(
///     vec!["MKT".into()],
///     (0..40).map(|i| (start.add_days(i as i64), vec![Some(factor[i])])).collect(),
/// )
/// .unwrap();
///
/// let model = run_factor_regression(&portfolio, &factors).unwrap();
/// assert!((model.beta("MKT").unwrap() - 0.5).abs() < 0.01);
/// assert!(model.r_squared > 0.99);
/// ```
pub fn run_factor_regression(
    portfolio: &PortfolioReturnSeries,
    factors: &DateTable,
) -> RiskResult<FactorModel> {
    let frequency = portfolio.frequency().clone();
    let k = factors.n_cols();
    if factors.is_empty() || portfolio.is_empty() {
        return Ok(FactorModel::degenerate(frequency));
    }

    let aligned: Vec<(f64, Vec<f64>)> = portfolio
        .points()
        .iter()
        .filter_map(|p| {
            let row = factors.row(p.date)?;
            let values: Option<Vec<f64>> = row.iter().copied().collect();
            values.map(|v| (p.value, v))
        })
        .collect();

    let n = aligned.len();
    if n < k + 2 {
        tracing::debug!(
            rows = n,
            factors = k,
            "insufficient aligned rows for factor regression"
        );
        return Ok(FactorModel::degenerate(frequency));
    }

    let y = DVector::from_iterator(n, aligned.iter().map(|(y, _)| *y));
    let x = DMatrix::from_fn(n, k + 1, |i, j| {
        if j == 0 {
            1.0
        } else {
            aligned[i].1[j - 1]
        }
    });

    let fit = OlsFit::solve(&x, &y)?;

    let exposures = factors
        .column_names()
        .iter()
        .enumerate()
        .map(|(j, name)| {
            let (t_stat, p_value) = fit.significance(j + 1);
            FactorExposure {
                factor_name: name.clone(),
                beta: fit.coefficients[j + 1],
                t_stat,
                p_value,
            }
        })
        .collect();

    Ok(FactorModel {
        frequency,
        r_squared: fit.r_squared,
        exposures,
    })
}

/// Solved least-squares problem.
struct OlsFit {
    coefficients: DVector<f64>,
    std_errors: DVector<f64>,
    r_squared: f64,
    t_dist: StudentsT,
}

impl OlsFit {
    fn solve(x: &DMatrix<f64>, y: &DVector<f64>) -> RiskResult<Self> {
        let (n, p) = x.shape();
        let svd = x.clone().svd(true, true);
        let u = svd
            .u
            .ok_or_else(|| RiskError::regression("SVD did not produce U"))?;
        let v_t = svd
            .v_t
            .ok_or_else(|| RiskError::regression("SVD did not produce Vᵀ"))?;
        let sigma = svd.singular_values;

        // Same cut-off as LAPACK-style rank estimation: eps * max(n, p) * s_max.
        let cutoff = f64::EPSILON * n.max(p) as f64 * sigma.max();
        let sigma_inv = sigma.map(|s| if s > cutoff { 1.0 / s } else { 0.0 });
        let rank = sigma_inv.iter().filter(|s| **s > 0.0).count();

        let v = v_t.transpose();
        let coefficients = &v * (u.transpose() * y).component_mul(&sigma_inv);
        let residuals = y - x * &coefficients;
        let rss = residuals.norm_squared();

        let df = n.saturating_sub(rank).max(1);
        let sigma2 = rss / df as f64;
        // diag((XᵀX)⁺) = diag(V Σ⁻² Vᵀ)
        let inv_sq = sigma_inv.map(|s| s * s);
        let std_errors = DVector::from_fn(p, |j, _| {
            let var = (0..inv_sq.len())
                .map(|i| v[(j, i)] * v[(j, i)] * inv_sq[i])
                .sum::<f64>();
            (sigma2 * var).max(0.0).sqrt()
        });

        let y_mean = y.mean();
        let tss = y.iter().map(|v| (v - y_mean).powi(2)).sum::<f64>();
        // A constant response has no variance to explain.
        let r_squared = if tss > f64::EPSILON * y.norm_squared() {
            (1.0 - rss / tss).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let t_dist = StudentsT::new(0.0, 1.0, df as f64)
            .map_err(|e| RiskError::regression(e.to_string()))?;

        Ok(Self {
            coefficients,
            std_errors,
            r_squared,
            t_dist,
        })
    }

    /// t statistic and two-sided p-value of coefficient `j`.
    fn significance(&self, j: usize) -> (f64, f64) {
        let se = self.std_errors[j];
        if !(se > 0.0 && se.is_finite()) {
            return (0.0, 1.0);
        }
        let t = self.coefficients[j] / se;
        let p = 2.0 * (1.0 - self.t_dist.cdf(t.abs()));
        (t, p.clamp(0.0, 1.0))
    }
}
