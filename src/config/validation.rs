//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{Result, RollCallError};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(RollCallError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(RollCallError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(RollCallError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(RollCallError::Config("Log level is required".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_database_url_is_rejected() {
        let mut settings = Settings::default();
        settings.database.url = String::new();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn zero_max_connections_is_rejected() {
        let mut settings = Settings::default();
        settings.database.max_connections = 0;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn min_above_max_is_rejected() {
        let mut settings = Settings::default();
        settings.database.min_connections = 10;
        settings.database.max_connections = 2;
        assert!(validate_settings(&settings).is_err());
    }
}
