use crate::error::ConfigError;
use config::{Environment, File, FileFormat};
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{EngineConfig, InterestBasis, RatioPolicy, ScenarioMultipliers, ScenarioSet};

/// The file looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "finhealth";

/// The prefix of environment variables that override the file.
pub const ENV_PREFIX: &str = "FINHEALTH";

/// Loads the engine configuration.
///
/// With `path`, that file must exist. Without it, `finhealth.toml` in the
/// working directory is used if present. `FINHEALTH__<SECTION>__<KEY>`
/// environment variables override both, and a missing file everywhere simply
/// yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, ConfigError> {
    load_layered(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn load_layered(path: Option<&Path>, env: Environment) -> Result<EngineConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    let config = builder.try_deserialize::<EngineConfig>()?;
    config.validate()?;

    tracing::debug!(?config, "Loaded engine configuration.");
    Ok(config)
}

/// Parses a TOML document into a validated configuration.
pub fn load_config_from_str(toml: &str) -> Result<EngineConfig, ConfigError> {
    let config = config::Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize::<EngineConfig>()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.ratios.interest_basis, InterestBasis::LtmOpexProxy);
        assert_relative_eq!(config.ratios.interest_proxy_rate, 0.05);
        assert_relative_eq!(config.ratios.debt_service_principal_rate, 0.10);
        assert_relative_eq!(config.ratios.days_in_year, 365.0);
        assert_eq!(config.scenarios, ScenarioSet::STANDARD);
    }

    #[test]
    fn test_standard_scenarios_match_documented_multipliers() {
        let s = ScenarioSet::STANDARD;
        assert_eq!(s.best_case.revenue_trend, 1.5);
        assert_eq!(s.best_case.cost_trend, 0.5);
        assert_eq!(s.worst_case.revenue_trend, 0.5);
        assert_eq!(s.worst_case.cost_trend, 1.5);
        assert_eq!(s.best_case.asset_growth, 1.2);
        assert_eq!(s.best_case.liability_growth, 0.8);
        assert_eq!(s.worst_case.asset_growth, 0.8);
        assert_eq!(s.worst_case.liability_growth, 1.2);
        assert_eq!(s.most_likely, ScenarioMultipliers::MOST_LIKELY);
    }

    #[test]
    fn test_partial_override() {
        let toml = r#"
            [ratios]
            interest_basis = "reported"
            days_in_year = 360
        "#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.ratios.interest_basis, InterestBasis::Reported);
        assert_relative_eq!(config.ratios.days_in_year, 360.0);
        assert_relative_eq!(config.ratios.interest_proxy_rate, 0.05);
        assert_eq!(config.scenarios, ScenarioSet::STANDARD);
    }

    #[test]
    fn test_scenario_override() {
        let toml = r#"
            [scenarios.best_case]
            revenue_trend = 2.0
            cost_trend = 0.25
            asset_growth = 1.3
            liability_growth = 0.7
            revenue_band = 1.2
            cost_band = 0.8
        "#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.scenarios.best_case.revenue_trend, 2.0);
        assert_eq!(config.scenarios.worst_case, ScenarioMultipliers::WORST_CASE);
    }

    #[test]
    fn test_single_scenario_key_falls_back_to_its_own_constant() {
        let config = load_config_from_str("[scenarios.best_case]\nrevenue_trend = 2.0\n").unwrap();

        let best = config.scenarios.best_case;
        assert_eq!(best.revenue_trend, 2.0);
        assert_eq!(
            ScenarioMultipliers {
                revenue_trend: ScenarioMultipliers::BEST_CASE.revenue_trend,
                ..best
            },
            ScenarioMultipliers::BEST_CASE
        );
        assert_eq!(config.scenarios.most_likely, ScenarioMultipliers::MOST_LIKELY);
        assert_eq!(config.scenarios.worst_case, ScenarioMultipliers::WORST_CASE);
    }

    #[test]
    fn test_partial_worst_case_section() {
        let toml = r#"
            [scenarios.worst_case]
            cost_band = 1.25
        "#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.scenarios.worst_case.cost_band, 1.25);
        assert_eq!(config.scenarios.worst_case.revenue_trend, 0.5);
        assert_eq!(config.scenarios.best_case, ScenarioMultipliers::BEST_CASE);
    }

    fn env_with(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("finhealth.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            load_layered(Some(missing.as_path()), env_with(&[])),
            Err(ConfigError::LoadError(_))
        ));
        assert!(matches!(
            load_config(Some(missing.as_path())),
            Err(ConfigError::LoadError(_))
        ));
    }

    #[test]
    fn test_missing_default_file_yields_defaults() {
        // The crate directory, where tests run, carries no finhealth.toml.
        let config = load_layered(None, env_with(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_file_is_loaded_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[ratios]\ndays_in_year = 360\n");

        let config = load_layered(Some(path.as_path()), env_with(&[])).unwrap();
        assert_relative_eq!(config.ratios.days_in_year, 360.0);
        assert_eq!(config.ratios.interest_basis, InterestBasis::LtmOpexProxy);
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "[ratios]\ninterest_basis = \"ltm_opex_proxy\"\ndays_in_year = 360\n",
        );
        let env = env_with(&[
            ("FINHEALTH__RATIOS__INTEREST_BASIS", "reported"),
            ("FINHEALTH__SCENARIOS__BEST_CASE__REVENUE_TREND", "2.0"),
        ]);

        let config = load_layered(Some(path.as_path()), env).unwrap();
        assert_eq!(config.ratios.interest_basis, InterestBasis::Reported);
        assert_relative_eq!(config.ratios.days_in_year, 360.0);
        assert_eq!(config.scenarios.best_case.revenue_trend, 2.0);
        assert_eq!(config.scenarios.best_case.cost_trend, 0.5);
    }

    #[test]
    fn test_environment_values_are_validated() {
        let env = env_with(&[("FINHEALTH__RATIOS__INTEREST_PROXY_RATE", "1.5")]);
        assert!(matches!(
            load_layered(None, env),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validation_rejects_negative_proxy_rate() {
        let toml = r#"
            [ratios]
            interest_proxy_rate = -0.05
        "#;
        assert!(matches!(
            load_config_from_str(toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validation_rejects_zero_day_count() {
        let mut config = EngineConfig::default();
        config.ratios.days_in_year = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_negative_multiplier() {
        let mut config = EngineConfig::default();
        config.scenarios.worst_case.cost_trend = -1.0;
        assert!(config.validate().is_err());
    }
}
