//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! payroll parameters from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{MpfRates, ReportingCalendar, StatutoryConfig, StatutoryRules};

/// Loads and provides access to the statutory configuration.
///
/// # Directory Structure
///
/// ```text
/// config/hk/
/// ├── mpf.yaml        # MPF limits and Industry Scheme bands
/// ├── statutory.yaml  # ADW window and proportional pay rules
/// └── reporting.yaml  # Reporting year and filing calendar
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/hk")?;
/// println!("ADW window: {} months", loader.config().adw.window_months);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: StatutoryConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - The values are inconsistent (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let mpf = load_yaml::<MpfRates>(&path.join("mpf.yaml"))?;
        let rules = load_yaml::<StatutoryRules>(&path.join("statutory.yaml"))?;
        let reporting = load_yaml::<ReportingCalendar>(&path.join("reporting.yaml"))?;

        let config = StatutoryConfig::new(mpf, rules, reporting);
        config.validate()?;

        debug!(
            path = %path.display(),
            bands = config.mpf.industry_bands.len(),
            window_months = config.adw.window_months,
            "Loaded statutory configuration"
        );

        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> StatutoryConfig {
        self.config
    }
}

/// Loads and parses a YAML file.
pub(crate) fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
        path: path_str.clone(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
        path: path_str,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BandContribution;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/hk"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
    }

    #[test]
    fn test_shipped_configuration_matches_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.config(), &StatutoryConfig::default());
    }

    #[test]
    fn test_mpf_limits_loaded_correctly() {
        let config = ConfigLoader::load(config_path()).unwrap().into_config();

        assert_eq!(config.mpf.contribution_rate, dec("0.05"));
        assert_eq!(config.mpf.min_relevant_income, dec("7100"));
        assert_eq!(config.mpf.max_relevant_income, dec("30000"));
        assert_eq!(config.mpf.max_mandatory_contribution, dec("1500"));
    }

    #[test]
    fn test_industry_bands_loaded_in_order() {
        let config = ConfigLoader::load(config_path()).unwrap().into_config();

        let bounds: Vec<Decimal> = config
            .mpf
            .industry_bands
            .iter()
            .map(|b| b.lower_bound)
            .collect();
        assert_eq!(bounds, vec![dec("0"), dec("280"), dec("350"), dec("650")]);

        assert_eq!(
            config.mpf.industry_bands[3].employee,
            BandContribution::Percentage {
                rate: dec("0.05"),
                daily_cap: dec("50"),
            }
        );
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("mpf.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_yaml_reports_parse_errors() {
        let dir = std::env::temp_dir().join(format!("payroll-engine-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("mpf.yaml");
        fs::write(&file, "contribution_rate: [not a number").unwrap();

        let result = load_yaml::<MpfRates>(&file);
        fs::remove_dir_all(&dir).ok();

        match result {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("mpf.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }
}
