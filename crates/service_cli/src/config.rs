//! CLI configuration.
//!
//! Loaded from a TOML file, then overridden by `SLICE_*` environment
//! variables, then validated:
//!
//! ```toml
//! log_level = "info"
//!
//! [risk]
//! risk_free_rate_annual = 0.02
//! rolling_windows = [21, 63, 252]
//!
//! [risk.rails]
//! concentration_threshold = 0.25
//! var_horizon_days = 21
//!
//! [risk.rails.regime]
//! vix_above = 30.0
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use slice_risk::{RiskConfig, RiskError};

/// Log levels accepted by `log_level`.
const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Default tracing level when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Risk engine parameters
    #[serde(default)]
    pub risk: RiskConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            risk: RiskConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply `SLICE_*` environment variable overrides.
    pub fn with_env_override(mut self) -> Self {
        if let Ok(log_level) = std::env::var("SLICE_LOG_LEVEL") {
            self.log_level = log_level;
        }

        override_from_env("SLICE_RISK_FREE_RATE", &mut self.risk.risk_free_rate_annual);
        override_from_env(
            "SLICE_VAR_HORIZON_DAYS",
            &mut self.risk.rails.var_horizon_days,
        );
        override_from_env(
            "SLICE_CONCENTRATION_THRESHOLD",
            &mut self.risk.rails.concentration_threshold,
        );
        override_from_env(
            "SLICE_CORRELATION_THRESHOLD",
            &mut self.risk.rails.correlation_threshold,
        );

        self
    }

    /// Validate the configuration, collecting every problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            ));
        }

        match self.risk.validate() {
            Ok(()) => {}
            Err(RiskError::InvalidConfig(risk_errors)) => errors.extend(risk_errors),
            Err(other) => errors.push(other.to_string()),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from `path` (or defaults), apply the environment, then validate.
    pub fn resolve(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }
}

fn override_from_env<T: FromStr>(key: &str, target: &mut T) {
    if let Ok(raw) = std::env::var(key) {
        match raw.trim().parse() {
            Ok(value) => *target = value,
            Err(_) => tracing::warn!(key, value = %raw, "ignoring unparseable environment override"),
        }
    }
}

/// Configuration error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// One or more settings are out of range
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_validates() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.risk, RiskConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
log_level = "debug"

[risk]
risk_free_rate_annual = 0.03

[risk.rails]
concentration_threshold = 0.25

[risk.rails.regime]
vix_above = 30.0
"#
        )
        .unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.risk.risk_free_rate_annual, 0.03);
        assert_eq!(config.risk.rolling_windows, vec![21, 63, 252]);
        assert_eq!(config.risk.rails.concentration_threshold, 0.25);
        assert_eq!(config.risk.rails.correlation_threshold, 0.8);
        assert_eq!(config.risk.rails.regime.vix_above, 30.0);
        assert_eq!(config.risk.rails.regime.cpi_yoy_above, 4.0);
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = ").unwrap();

        assert!(matches!(
            CliConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CliConfig::default());

        assert!(matches!(
            CliConfig::load(&dir.path().join("absent.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("SLICE_VAR_HORIZON_DAYS", "63");
        std::env::set_var("SLICE_CORRELATION_THRESHOLD", "not-a-number");
        let config = CliConfig::default().with_env_override();
        std::env::remove_var("SLICE_VAR_HORIZON_DAYS");
        std::env::remove_var("SLICE_CORRELATION_THRESHOLD");

        assert_eq!(config.risk.rails.var_horizon_days, 63);
        assert_eq!(config.risk.rails.correlation_threshold, 0.8);
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unparseable_override_is_logged() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        std::env::set_var("SLICE_TEST_BAD_THRESHOLD", "0.7x");
        let mut threshold = 0.8;
        tracing::subscriber::with_default(subscriber, || {
            override_from_env("SLICE_TEST_BAD_THRESHOLD", &mut threshold);
        });
        std::env::remove_var("SLICE_TEST_BAD_THRESHOLD");

        assert_eq!(threshold, 0.8);
        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("WARN"));
        assert!(logs.contains("SLICE_TEST_BAD_THRESHOLD"));
        assert!(logs.contains("0.7x"));
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = CliConfig::default();
        config.log_level = "loud".to_string();
        config.risk.rails.correlation_threshold = 1.5;
        config.risk.rolling_windows = vec![0];

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors[0].contains("log_level"));
                assert!(errors.iter().any(|e| e.contains("correlation_threshold")));
                assert!(errors.iter().any(|e| e.contains("rolling_windows")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_valid_log_levels() {
        for level in &["trace", "debug", "info", "warn", "error", "INFO", "Warn"] {
            let mut config = CliConfig::default();
            config.log_level = level.to_string();
            assert!(config.validate().is_ok(), "Log level '{}' should be valid", level);
        }
    }
}
