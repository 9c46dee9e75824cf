//! Descriptive statistics over plain slices.
//!
//! Every function returns `None` when the statistic is undefined for the
//! given input rather than propagating NaN.

/// Arithmetic mean. `None` for empty input.
#[inline]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
///
/// `None` for fewer than two observations. A constant input yields exactly
/// `0.0`, independent of rounding in the mean.
///
/// # Examples
///
/// ```
/// use slice_core::math::stats::sample_std;
///
/// assert_eq!(sample_std(&[0.01; 10]), Some(0.0));
/// assert_eq!(sample_std(&[0.01]), None);
/// assert!((sample_std(&[1.0, 2.0, 3.0]).unwrap() - 1.0).abs() < 1e-15);
/// ```
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    if values.iter().all(|v| *v == values[0]) {
        return Some(0.0);
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Pearson correlation of two equally long slices.
///
/// `None` when fewer than two pairs exist, the lengths differ, or either side
/// has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let sx = sample_std(xs)?;
    let sy = sample_std(ys)?;
    if sx == 0.0 || sy == 0.0 {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;
    let cov: f64 = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mx) * (y - my))
        .sum::<f64>()
        / (xs.len() - 1) as f64;
    Some((cov / (sx * sy)).clamp(-1.0, 1.0))
}

/// Empirical quantile with linear interpolation between order statistics.
///
/// For `n` sorted values the quantile `q` sits at position `q * (n - 1)`.
/// `q` is clamped to `[0, 1]`. `None` for empty input.
///
/// # Examples
///
/// ```
/// use slice_core::math::stats::quantile;
///
/// let values = [4.0, 1.0, 3.0, 2.0];
/// assert_eq!(quantile(&values, 0.0), Some(1.0));
/// assert_eq!(quantile(&values, 1.0), Some(4.0));
/// assert!((quantile(&values, 0.5).unwrap() - 2.5).abs() < 1e-15);
/// ```
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_relative_eq!(mean(&[1.0, 2.0, 6.0]).unwrap(), 3.0);
    }

    #[test]
    fn test_sample_std_known_value() {
        // Sample variance of [2, 4, 4, 4, 5, 5, 7, 9] is 32 / 7.
        let sd = sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_relative_eq!(sd, (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [8.0, 6.0, 4.0, 2.0];
        assert_relative_eq!(pearson(&xs, &ys).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_undefined_cases() {
        assert_eq!(pearson(&[1.0], &[2.0]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[3.0, 3.0]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[3.0]), None);
    }

    #[test]
    fn test_quantile_interpolates() {
        let values: Vec<f64> = (1..=11).map(|i| i as f64).collect();
        assert_relative_eq!(quantile(&values, 0.05).unwrap(), 1.5, epsilon = 1e-12);
        assert_relative_eq!(quantile(&values, 0.25).unwrap(), 3.5, epsilon = 1e-12);
    }

    #[test]
    fn test_quantile_single_value() {
        assert_eq!(quantile(&[0.3], 0.01), Some(0.3));
        assert_eq!(quantile(&[], 0.5), None);
    }
}
