//! Check command: resolve and validate the configuration.

use std::path::Path;

use crate::config::CliConfig;
use crate::Result;

/// Load the configuration at `path`, apply the environment and validate it.
///
/// Prints the effective settings on success.
pub fn run(path: &Path) -> Result<()> {
    let source = if path.exists() {
        path.display().to_string()
    } else {
        "built-in defaults".to_string()
    };
    tracing::info!(source = %source, "Checking configuration");

    let config = CliConfig::resolve(path)?;
    println!("{}", summary(&config, &source));
    Ok(())
}

fn summary(config: &CliConfig, source: &str) -> String {
    let risk = &config.risk;
    let rails = &risk.rails;
    let windows: Vec<String> = risk.rolling_windows.iter().map(|w| w.to_string()).collect();

    [
        format!("Configuration OK ({})", source),
        format!("  engine version: {}", slice_risk::VERSION),
        format!("  log level: {}", config.log_level),
        format!("  risk-free rate (annual): {}", risk.risk_free_rate_annual),
        format!("  rolling windows: {}", windows.join(", ")),
        format!("  concentration threshold: {}", rails.concentration_threshold),
        format!("  correlation threshold: {}", rails.correlation_threshold),
        format!(
            "  VaR: {} periods at {} / {}",
            rails.var_horizon_days, rails.var_alpha_95, rails.var_alpha_99
        ),
        format!(
            "  regime: curve < {}, CPI YoY > {}, VIX > {}",
            rails.regime.curve_inversion_below, rails.regime.cpi_yoy_above, rails.regime.vix_above
        ),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::CliError;

    #[test]
    fn test_summary_lists_effective_settings() {
        let text = summary(&CliConfig::default(), "built-in defaults");
        assert!(text.starts_with("Configuration OK (built-in defaults)"));
        assert!(text.contains("  rolling windows: 21, 63, 252"));
        assert!(text.contains("  VaR: 21 periods at 0.05 / 0.01"));
    }

    #[test]
    fn test_invalid_config_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slice.toml");
        std::fs::write(&path, "[risk.rails]\ncorrelation_threshold = 1.5\n").unwrap();

        match run(&path) {
            Err(CliError::Config(ConfigError::Validation(errors))) => {
                assert!(errors.iter().any(|e| e.contains("correlation_threshold")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }
}
