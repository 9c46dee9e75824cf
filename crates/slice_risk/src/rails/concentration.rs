//! Position concentration checks.

use slice_core::types::Weights;

/// A position whose absolute weight exceeds the concentration threshold.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConcentrationFlag {
    /// Asset identifier
    pub asset: String,
    /// Signed portfolio weight
    pub weight: f64,
    /// Threshold that was exceeded
    pub threshold: f64,
}

/// Flag every position with `|weight| > threshold`, in weight order.
///
/// A weight exactly at the threshold is not flagged. Short positions are
/// judged by magnitude.
pub fn compute_concentration_flags(weights: &Weights, threshold: f64) -> Vec<ConcentrationFlag> {
    weights
        .iter()
        .filter(|(_, w)| w.abs() > threshold)
        .map(|(asset, weight)| ConcentrationFlag {
            asset: asset.to_string(),
            weight,
            threshold,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        let weights = Weights::new([("A", 0.5), ("B", 0.3), ("C", 0.2)]).unwrap();
        let flags = compute_concentration_flags(&weights, 0.2);

        assert_eq!(
            flags,
            vec![
                ConcentrationFlag {
                    asset: "A".into(),
                    weight: 0.5,
                    threshold: 0.2
                },
                ConcentrationFlag {
                    asset: "B".into(),
                    weight: 0.3,
                    threshold: 0.2
                },
            ]
        );
    }

    #[test]
    fn test_short_positions_flagged_by_magnitude() {
        let weights = Weights::new([("LONG", 0.1), ("SHORT", -0.4)]).unwrap();
        let flags = compute_concentration_flags(&weights, 0.2);
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].asset, "SHORT");
        assert_eq!(flags[0].weight, -0.4);
    }

    #[test]
    fn test_order_follows_weights() {
        let weights = Weights::new([("Z", 0.5), ("A", 0.5)]).unwrap();
        let assets: Vec<String> = compute_concentration_flags(&weights, 0.2)
            .into_iter()
            .map(|f| f.asset)
            .collect();
        assert_eq!(assets, vec!["Z", "A"]);
    }
}
