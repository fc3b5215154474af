//! Nuqta event marketplace
//!
//! A bilingual (Arabic/English) event discovery and ticketing marketplace
//! connecting event organizers with attendees in Istanbul. This library
//! provides the domain layers of the platform: geo-filtered event search,
//! discount evaluation, booking lifecycle and capacity accounting,
//! favorites, vendor accounts and analytics, with multi-language support.

pub mod config;
pub mod services;
pub mod models;
pub mod database;
pub mod i18n;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{NuqtaError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;
pub use i18n::I18n;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
