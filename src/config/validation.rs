//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{NuqtaError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_auth_config(&settings.auth)?;
    validate_email_config(&settings.email)?;
    validate_search_config(&settings.search)?;
    validate_booking_config(&settings.booking)?;
    validate_i18n_config(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(NuqtaError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(NuqtaError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(NuqtaError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate access-token configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.jwt_secret.is_empty() {
        return Err(NuqtaError::Config("JWT secret is required".to_string()));
    }

    Ok(())
}

/// Validate email API configuration
fn validate_email_config(config: &super::EmailConfig) -> Result<()> {
    if config.enabled {
        if config.api_key.is_empty() {
            return Err(NuqtaError::Config(
                "Email API key is required when email is enabled".to_string(),
            ));
        }

        if config.from_address.is_empty() {
            return Err(NuqtaError::Config(
                "Email from address is required when email is enabled".to_string(),
            ));
        }
    }

    // Even a disabled mailer must carry a well-formed endpoint
    url::Url::parse(&config.api_url)
        .map_err(|e| NuqtaError::Config(format!("Invalid email API URL: {}", e)))?;

    if config.timeout_seconds == 0 {
        return Err(NuqtaError::Config(
            "Email timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate event discovery configuration
fn validate_search_config(config: &super::SearchConfig) -> Result<()> {
    if config.default_limit <= 0 {
        return Err(NuqtaError::Config(
            "Search default limit must be greater than 0".to_string(),
        ));
    }

    if config.max_limit < config.default_limit {
        return Err(NuqtaError::Config(
            "Search max limit cannot be below the default limit".to_string(),
        ));
    }

    Ok(())
}

/// Validate booking lifecycle configuration
fn validate_booking_config(config: &super::BookingConfig) -> Result<()> {
    if config.pending_ttl_minutes <= 0 {
        return Err(NuqtaError::Config(
            "Pending booking TTL must be greater than 0".to_string(),
        ));
    }

    if config.cleanup_interval_minutes == 0 {
        return Err(NuqtaError::Config(
            "Cleanup interval must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate internationalization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_language.is_empty() {
        return Err(NuqtaError::Config("Default language is required".to_string()));
    }

    if config.supported_languages.is_empty() {
        return Err(NuqtaError::Config(
            "At least one supported language is required".to_string(),
        ));
    }

    if !config.supported_languages.contains(&config.default_language) {
        return Err(NuqtaError::Config(
            "Default language must be in supported languages list".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(NuqtaError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(NuqtaError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.auth.jwt_secret = "test-secret".to_string();
        settings
    }

    #[test]
    fn test_default_settings_with_secret_pass() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_missing_jwt_secret_rejected() {
        let settings = Settings::default();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_enabled_email_requires_api_key() {
        let mut settings = valid_settings();
        settings.email.enabled = true;
        settings.email.api_key.clear();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let mut settings = valid_settings();
        settings.logging.level = "loud".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_default_language_must_be_supported() {
        let mut settings = valid_settings();
        settings.i18n.default_language = "tr".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
