//! Internationalization module
//!
//! This module handles multi-language support for the Nuqta marketplace.
//! It provides translation loading, language detection, message formatting,
//! and pluralization support for English and Arabic.

pub mod loader;

// Re-export commonly used i18n components
pub use loader::{I18n, LanguageStats, TranslationParams, TranslationStats};
