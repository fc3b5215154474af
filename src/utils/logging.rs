//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! utilities for the Nuqta application.

use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard must stay alive for the lifetime of the process,
/// otherwise buffered file output is lost.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "nuqta.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log booking lifecycle transitions with structured data
pub fn log_booking_transition(booking_id: i64, from: &str, to: &str, actor_id: Option<i64>) {
    info!(
        booking_id = booking_id,
        from = from,
        to = to,
        actor_id = actor_id,
        "Booking transition"
    );
}

/// Log vendor dashboard actions
pub fn log_vendor_action(vendor_id: i64, action: &str, details: Option<&str>) {
    info!(
        vendor_id = vendor_id,
        action = action,
        details = details,
        "Vendor action performed"
    );
}

/// Log discount redemption attempts
pub fn log_discount_attempt(vendor_id: i64, code: &str, accepted: bool, reason: Option<&str>) {
    if accepted {
        info!(vendor_id = vendor_id, code = code, "Discount code accepted");
    } else {
        info!(
            vendor_id = vendor_id,
            code = code,
            reason = reason,
            "Discount code rejected"
        );
    }
}

/// Log email dispatch failures (always swallowed, never surfaced)
pub fn log_email_failure(to: &str, subject: &str, error: &str) {
    warn!(
        to = to,
        subject = subject,
        error = error,
        "Email dispatch failed"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}
