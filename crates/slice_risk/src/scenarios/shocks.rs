//! Factor shocks and scenario definitions.

/// Hypothetical move of one factor, in return units (`0.01` = +1%).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioShock {
    /// Factor being shocked
    pub factor_name: String,
    /// Signed shock magnitude
    pub shock: f64,
}

impl ScenarioShock {
    /// Create a new shock.
    pub fn new(factor_name: impl Into<String>, shock: f64) -> Self {
        Self {
            factor_name: factor_name.into(),
            shock,
        }
    }

    /// Returns the same shock scaled by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            factor_name: self.factor_name.clone(),
            shock: self.shock * factor,
        }
    }
}

/// Named set of simultaneous factor shocks.
///
/// # Examples
///
/// ```
/// use slice_risk::scenarios::ScenarioConfig;
///
/// let scenario = ScenarioConfig::named("Rates +100bp")
///     .with_description("Parallel rates selloff")
///     .with_shock("RATES", 0.01)
///     .with_shock("EQUITY", -0.02);
///
/// assert_eq!(scenario.name, "Rates +100bp");
/// assert_eq!(scenario.shocks.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioConfig {
    /// Scenario name
    pub name: String,
    /// Optional free-text description
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    /// Shocks applied together
    #[cfg_attr(feature = "serde", serde(default))]
    pub shocks: Vec<ScenarioShock>,
}

impl ScenarioConfig {
    /// Create a scenario with explicit shocks.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        shocks: Vec<ScenarioShock>,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            shocks,
        }
    }

    /// Create an empty scenario.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, None, Vec::new())
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a shock.
    pub fn with_shock(mut self, factor_name: impl Into<String>, shock: f64) -> Self {
        self.shocks.push(ScenarioShock::new(factor_name, shock));
        self
    }

    /// Returns the same scenario with every shock scaled by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            shocks: self.shocks.iter().map(|s| s.scaled(factor)).collect(),
        }
    }
}
