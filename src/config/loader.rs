//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_valid() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert!(validate_config(&config).is_ok());
        assert!(config.prompt.contains("{path}"));
    }

    #[test]
    fn test_partial_config_overrides_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            prompt = "Serve {path}"

            [llm]
            model = "test-model"
            temperature = "0.2"
            "#,
        )
        .unwrap();
        assert_eq!(config.prompt, "Serve {path}");
        assert_eq!(config.llm.model, "test-model");
        assert_eq!(config.llm.temperature.as_deref(), Some("0.2"));
        assert_eq!(config.listener.bind_address, "127.0.0.1:8000");
    }
}
