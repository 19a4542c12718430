//! Run configuration loading and validation.

use crate::error::ConfigError;
use crate::types::RunConfig;
use std::path::Path;

/// Loads and validates a `tessera.toml` run configuration.
pub fn load_run_config(path: &Path) -> Result<RunConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    load_run_config_from_str(&content)
}

/// Parses and validates a run configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_run_config_from_str(content: &str) -> Result<RunConfig, ConfigError> {
    let config: RunConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configuration values are consistent.
fn validate_config(config: &RunConfig) -> Result<(), ConfigError> {
    if config.output.partitions == 0 {
        return Err(ConfigError::ValidationError(
            "output.partitions must be at least 1".to_string(),
        ));
    }
    if config.generate.limit.is_some() && config.generate.random_sample.is_some() {
        return Err(ConfigError::ValidationError(
            "generate.limit and generate.random_sample are mutually exclusive".to_string(),
        ));
    }
    if config.generate.random_sample == Some(0) {
        return Err(ConfigError::ValidationError(
            "generate.random_sample must be at least 1".to_string(),
        ));
    }
    if config.sample.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "sample.max_attempts must be at least 1".to_string(),
        ));
    }
    if config.soc.cpu_arch.trim().is_empty() {
        return Err(ConfigError::MissingField("soc.cpu_arch".to_string()));
    }
    Ok(())
}
