//! Sampling frequency of a return series.

use std::fmt;
use std::str::FromStr;

/// Trading days per year used to annualise daily statistics.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Sampling frequency of a return series.
///
/// Governs the annualisation factor of volatility and Sharpe. Labels other
/// than `D`, `W` and `M` are preserved verbatim and annualise as daily data.
///
/// # Examples
///
/// ```
/// use slice_core::types::Frequency;
///
/// assert_eq!(Frequency::Daily.periods_per_year(), 252);
/// assert_eq!(Frequency::Weekly.periods_per_year(), 52);
/// assert_eq!(Frequency::Monthly.periods_per_year(), 12);
///
/// let q: Frequency = "Q".parse().unwrap();
/// assert_eq!(q.periods_per_year(), 252);
/// assert_eq!(q.label(), "Q");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum Frequency {
    /// One observation per trading day (`"D"`).
    #[default]
    Daily,
    /// One observation per week (`"W"`).
    Weekly,
    /// One observation per month (`"M"`).
    Monthly,
    /// Any other label; annualised as daily.
    Other(String),
}

impl Frequency {
    /// Returns the number of periods per year for annualisation.
    #[inline]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Daily => TRADING_DAYS_PER_YEAR,
            Frequency::Weekly => 52,
            Frequency::Monthly => 12,
            Frequency::Other(_) => TRADING_DAYS_PER_YEAR,
        }
    }

    /// Returns the short wire label (`"D"`, `"W"`, `"M"` or the raw label).
    pub fn label(&self) -> &str {
        match self {
            Frequency::Daily => "D",
            Frequency::Weekly => "W",
            Frequency::Monthly => "M",
            Frequency::Other(label) => label,
        }
    }
}

impl From<&str> for Frequency {
    fn from(label: &str) -> Self {
        match label {
            "D" => Frequency::Daily,
            "W" => Frequency::Weekly,
            "M" => Frequency::Monthly,
            "" => Frequency::Daily,
            other => Frequency::Other(other.to_string()),
        }
    }
}

impl From<String> for Frequency {
    fn from(label: String) -> Self {
        Frequency::from(label.as_str())
    }
}

impl From<Frequency> for String {
    fn from(freq: Frequency) -> Self {
        freq.label().to_string()
    }
}

impl FromStr for Frequency {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Frequency::from(s))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
