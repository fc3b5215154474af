//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub email: EmailConfig,
    pub search: SearchConfig,
    pub booking: BookingConfig,
    pub vendors: VendorsConfig,
    pub i18n: I18nConfig,
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Access-token verification configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

/// Transactional email API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from_address: String,
    pub timeout_seconds: u64,
    pub enabled: bool,
}

/// Event discovery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub default_limit: i64,
    pub max_limit: i64,
}

/// Booking lifecycle configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookingConfig {
    /// Minutes an unpaid pending_payment booking survives before cleanup
    pub pending_ttl_minutes: i64,
    /// Minutes between maintenance sweeps
    pub cleanup_interval_minutes: u64,
}

/// Vendor account configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VendorsConfig {
    /// Vendors created before this instant lock in founder pricing
    pub founder_pricing_cutoff: Option<DateTime<Utc>>,
}

/// Internationalization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct I18nConfig {
    pub default_language: String,
    pub supported_languages: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("NUQTA").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::NuqtaError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/nuqta".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            auth: AuthConfig {
                jwt_secret: String::new(),
            },
            email: EmailConfig {
                api_url: "https://api.resend.com/emails".to_string(),
                api_key: String::new(),
                from_address: "Nuqta <no-reply@nuqta.ist>".to_string(),
                timeout_seconds: 10,
                enabled: false,
            },
            search: SearchConfig {
                default_limit: 50,
                max_limit: 100,
            },
            booking: BookingConfig {
                pending_ttl_minutes: 60,
                cleanup_interval_minutes: 15,
            },
            vendors: VendorsConfig {
                founder_pricing_cutoff: None,
            },
            i18n: I18nConfig {
                default_language: "en".to_string(),
                supported_languages: vec!["en".to_string(), "ar".to_string()],
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/nuqta".to_string(),
            },
        }
    }
}
